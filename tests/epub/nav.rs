use crate::epub::util::{NAV, PACKAGE, TestEpub, example_file, zip_with};
use folio::Epub;
use folio::ebook::errors::{EbookError, NotFoundError, ParseError, ResourceError};
use folio::ebook::location::Location;
use folio::ebook::nav::{NavItem, NavKind, Navigation};
use folio::epub::{EpubSettings, TocFormat};
use wasm_bindgen_test::wasm_bindgen_test;

struct Expected<'a> {
    label: &'a str,
    href: Option<&'a str>,
    target: Option<(&'a str, usize)>,
    children: usize,
}

fn assert_item(expected: &Expected, item: &NavItem) {
    assert_eq!(expected.label, item.label());
    assert_eq!(expected.href, item.href());
    assert_eq!(
        expected.target.map(|(id, offset)| Location::new(id, offset)).as_ref(),
        item.target()
    );
    assert_eq!(expected.children, item.children().len());
}

#[test]
#[wasm_bindgen_test]
fn test_toc() {
    let epub = TestEpub::File.open();
    let toc = epub.navigation().contents().unwrap();

    assert_eq!("Contents", toc.label());
    assert_eq!(None, toc.target());
    assert_eq!(Some("toc"), toc.epub_type());

    let expected = [
        Expected {
            label: "Cover",
            href: Some("cover.xhtml"),
            target: Some(("cover", 0)),
            children: 0,
        },
        Expected {
            label: "Chapter One",
            href: Some("text/c1.xhtml"),
            target: Some(("c1", 0)),
            children: 1,
        },
        Expected {
            label: "Map",
            href: Some("images/map.svg"),
            target: Some(("map", 0)),
            children: 0,
        },
        // Headings have no target
        Expected {
            label: "Part Two",
            href: None,
            target: None,
            children: 1,
        },
        // Links outside the container have no target
        Expected {
            label: "Errata",
            href: Some("https://example.com/errata"),
            target: None,
            children: 0,
        },
    ];
    assert_eq!(expected.len(), toc.children().len());
    for (expected, item) in expected.iter().zip(toc.children()) {
        assert_item(expected, item);
    }

    let section = &toc.children()[1].children()[0];
    assert_item(
        &Expected {
            label: "The Second Paragraph",
            href: Some("text/c1.xhtml#c1-s2"),
            target: Some(("c1", 57)),
            children: 0,
        },
        section,
    );
    let chapter_two = &toc.children()[3].children()[0];
    assert_eq!(Some(&Location::new("c2", 0)), chapter_two.target());
}

#[test]
#[wasm_bindgen_test]
fn test_kinds() {
    let epub = TestEpub::File.open();
    let navigation = epub.navigation();

    assert_eq!(
        vec![
            NavKind::Toc,
            NavKind::PageList,
            NavKind::Landmarks,
            NavKind::Custom("loi".to_owned()),
        ],
        navigation.kinds().cloned().collect::<Vec<_>>()
    );
    assert_eq!(
        navigation.custom("loi"),
        navigation.tree(&NavKind::Custom("loi".to_owned())).ok()
    );
    assert_eq!(
        Err(NotFoundError::Tree("lot".to_owned())),
        navigation.tree(&NavKind::from("lot"))
    );
}

#[test]
#[wasm_bindgen_test]
fn test_page_list() {
    let epub = TestEpub::File.open();
    let pages = epub.navigation().page_list().unwrap();

    assert_eq!("Pages", pages.label());
    let targets = pages
        .children()
        .iter()
        .map(|page| (page.label(), page.target().cloned()))
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            ("2", Some(Location::new("c1", 95))),
            ("3", Some(Location::new("c2", 37))),
        ],
        targets
    );
}

#[test]
#[wasm_bindgen_test]
fn test_landmarks() {
    let epub = TestEpub::File.open();
    let landmarks = epub.navigation().landmarks().unwrap();

    let types = landmarks
        .children()
        .iter()
        .map(|landmark| (landmark.epub_type(), landmark.label()))
        .collect::<Vec<_>>();
    assert_eq!(
        vec![(Some("cover"), "Cover"), (Some("bodymatter"), "Start Reading")],
        types
    );
    assert_eq!(
        Some(&Location::new("c1", 0)),
        landmarks.children()[1].target()
    );
}

#[test]
#[wasm_bindgen_test]
fn test_ncx_preference() {
    let epub = TestEpub::File.open_with(EpubSettings::builder().preferred_toc(TocFormat::Ncx));
    let navigation = epub.navigation();

    // The ncx supplies the toc and page list
    let toc = navigation.contents().unwrap();
    assert_eq!("Example EPUB", toc.label());
    assert_eq!(2, toc.children().len());
    assert_eq!(Some(&Location::new("c2", 0)), toc.children()[1].target());

    let pages = navigation.page_list().unwrap();
    assert_eq!(1, pages.children().len());
    assert_eq!(Some("normal"), pages.children()[0].epub_type());
    assert_eq!(Some(&Location::new("c1", 95)), pages.children()[0].target());

    // The nav document fills the remaining kinds
    assert_eq!("Start Reading", navigation.landmarks().unwrap().children()[1].label());
    assert!(navigation.custom("loi").is_some());
}

#[test]
fn test_guide_fallback() {
    let package = example_file(PACKAGE).replace(r#" properties="nav""#, "");
    let epub = Epub::load(zip_with(&[(PACKAGE, package.as_str())])).unwrap();
    let navigation = epub.navigation();

    // Without a nav document, the ncx supplies the toc
    assert_eq!("Example EPUB", navigation.contents().unwrap().label());

    let landmarks = navigation.landmarks().unwrap();
    let references = landmarks
        .children()
        .iter()
        .map(|reference| {
            (
                reference.epub_type(),
                reference.label(),
                reference.target().cloned(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            (Some("cover"), "Cover", Some(Location::new("cover", 0))),
            (Some("text"), "Beginning", Some(Location::new("c1", 0))),
        ],
        references
    );
    assert_eq!(None, navigation.custom("loi"));
}

#[test]
fn test_no_toc() {
    let package = example_file(PACKAGE)
        .replace(r#" properties="nav""#, "")
        .replace(r#" toc="ncx""#, "")
        .replace(
            r#"<item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>"#,
            "",
        );
    let bytes = zip_with(&[(PACKAGE, package.as_str())]);

    assert!(matches!(
        Epub::load(bytes.clone()),
        Err(EbookError::Parse(ParseError::NoTocFound))
    ));

    let epub = Epub::read(
        std::io::Cursor::new(bytes),
        EpubSettings::builder().strict(false),
    )
    .unwrap();
    assert_eq!(
        Err(NotFoundError::Tree("toc".to_owned())),
        epub.navigation().tree(&NavKind::Toc)
    );
    // The guide remains available
    assert!(epub.navigation().landmarks().is_some());
}

#[test]
fn test_dangling_targets() {
    let nav = example_file(NAV).replace("text/c1.xhtml#c1-s2", "text/c1.xhtml#nowhere");
    let bytes = zip_with(&[(NAV, nav.as_str())]);

    assert!(matches!(
        Epub::load(bytes.clone()),
        Err(EbookError::Resource(ResourceError::DanglingTarget { href, .. }))
            if href == "text/c1.xhtml#nowhere"
    ));

    // Lenient mode targets the start of the resource instead
    let epub = Epub::read(
        std::io::Cursor::new(bytes),
        EpubSettings::builder().strict(false),
    )
    .unwrap();
    let section = &epub.navigation().contents().unwrap().children()[1].children()[0];
    assert_eq!(Some(&Location::new("c1", 0)), section.target());

    // A missing resource is dangling regardless of strictness
    let nav = example_file(NAV).replace("images/map.svg", "images/globe.svg");
    let result = Epub::read(
        std::io::Cursor::new(zip_with(&[(NAV, nav.as_str())])),
        EpubSettings::builder().strict(false),
    );
    assert!(matches!(
        result,
        Err(EbookError::Resource(ResourceError::DanglingTarget { .. }))
    ));
}

#[test]
fn test_outside_reading_order() {
    let nav = example_file(NAV).replace(r#"href="images/map.svg">Map"#, r#"href="style.css">Map"#);
    let bytes = zip_with(&[(NAV, nav.as_str())]);

    assert!(Epub::load(bytes.clone()).is_err());

    let epub = Epub::read(
        std::io::Cursor::new(bytes),
        EpubSettings::builder().strict(false),
    )
    .unwrap();
    let map = &epub.navigation().contents().unwrap().children()[2];
    assert_eq!(Some("style.css"), map.href());
    assert_eq!(None, map.target());
}

#[test]
#[wasm_bindgen_test]
fn test_build() {
    let epub = TestEpub::File.open();
    let markup = br#"<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
  <body>
    <nav epub:type="lot">
      <ol><li><a href="text/c2.xhtml#c2-end">Final Table</a></li></ol>
    </nav>
  </body>
</html>"#;
    let navigation = Navigation::build(epub.content(), NAV, markup).unwrap();

    let lot = navigation.custom("lot").unwrap();
    assert_eq!(Some(&Location::new("c2", 37)), lot.children()[0].target());

    let invalid = br#"<nav xmlns:epub="http://www.idpf.org/2007/ops" epub:type="toc"><ol><li><a href="c9.xhtml">?</a></li></ol></nav>"#;
    assert!(matches!(
        Navigation::build(epub.content(), NAV, invalid),
        Err(EbookError::Resource(ResourceError::DanglingTarget { .. }))
    ));
}

#[test]
#[wasm_bindgen_test]
fn test_build_ncx() {
    let epub = TestEpub::File.open();
    let ncx = example_file("OEBPS/toc.ncx");
    let navigation =
        Navigation::build_ncx(epub.content(), "OEBPS/toc.ncx", ncx.as_bytes()).unwrap();

    assert_eq!(
        vec![&NavKind::Toc, &NavKind::PageList],
        navigation.kinds().collect::<Vec<_>>()
    );
}
