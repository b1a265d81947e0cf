use crate::epub::util::{PACKAGE, TestEpub, example_file, zip_with};
use folio::Epub;
use folio::ebook::errors::{EbookError, NotFoundError, ResourceError};
use folio::ebook::location::Location;
use folio::paginator::LayoutConfig;
use wasm_bindgen_test::wasm_bindgen_test;

#[test]
#[wasm_bindgen_test]
fn test_reading_order() {
    let epub = TestEpub::File.open();
    let content = epub.content();

    assert_eq!(["cover", "c1", "map", "c2"], content.reading_order());
    assert!(content.is_non_linear("cover"));
    assert!(!content.is_non_linear("c1"));
    assert_eq!(9, content.len());
}

#[test]
#[wasm_bindgen_test]
fn test_get() {
    let epub = TestEpub::File.open();
    let content = epub.content();

    let c1 = content.get("c1").unwrap();
    assert_eq!("OEBPS/text/c1.xhtml", c1.href());
    assert_eq!("application/xhtml+xml", c1.media_type());
    assert!(c1.is_text());
    assert_eq!(c1.len(), c1.data().len());
    assert!(String::from_utf8_lossy(c1.data()).contains("<h1 id=\"c1-title\">"));

    let nav = content.get("nav").unwrap();
    assert!(nav.has_property("nav"));
    // Text is only extracted from the reading order
    assert_eq!(None, nav.text());

    assert_eq!(
        Err(NotFoundError::Resource("missing".to_owned())),
        content.get("missing").map(|unit| unit.id())
    );
}

#[test]
#[wasm_bindgen_test]
fn test_by_href() {
    let epub = TestEpub::Dir.open();
    let content = epub.content();

    assert_eq!("c2", content.by_href("OEBPS/text/c2.xhtml").unwrap().id());
    assert_eq!("c2", content.by_href("/OEBPS/text/c2.xhtml#c2-end").unwrap().id());
    assert_eq!("map", content.by_href("OEBPS/images/map.svg").unwrap().id());
    assert!(content.by_href("OEBPS/text/c9.xhtml").is_none());
}

#[test]
#[wasm_bindgen_test]
fn test_remote_resource() {
    let epub = TestEpub::File.open();
    let font = epub.content().get("remote-font").unwrap();

    assert!(font.is_remote());
    assert!(font.is_empty());
    assert_eq!("https://example.com/fonts/serif.woff2", font.href());
    assert!(epub.content().by_href(font.href()).is_none());
}

#[test]
#[wasm_bindgen_test]
fn test_text_extraction() {
    let epub = TestEpub::File.open();
    let c1 = epub.content().get("c1").unwrap();

    assert_eq!(
        Some(
            "Chapter One\n\
             The quick brown fox jumps over the lazy dog.\n\
             A second paragraph follows the first.\n\
             The end of the first chapter."
        ),
        c1.text()
    );
    assert_eq!(124, c1.extent());
    assert_eq!(Some(0), c1.anchor("c1-title"));
    assert_eq!(Some(57), c1.anchor("c1-s2"));
    // The page break marker precedes the third paragraph
    assert_eq!(Some(95), c1.anchor("page2"));
    assert_eq!(None, c1.anchor("missing"));

    assert_eq!("A second paragraph", c1.excerpt(57..75));
    assert_eq!("chapter.", c1.excerpt(116..500));
}

#[test]
#[wasm_bindgen_test]
fn test_atomic_extent() {
    let epub = TestEpub::File.open();
    let map = epub.content().get("map").unwrap();

    assert!(!map.is_text());
    assert_eq!(None, map.text());
    assert_eq!(1, map.extent());
    assert_eq!("", map.excerpt(0..1));
}

#[test]
#[wasm_bindgen_test]
fn test_segments() {
    let epub = TestEpub::File.open();
    let paginator = epub
        .paginator_with(LayoutConfig::builder().width(100.0).build().unwrap())
        .unwrap();
    let first = &paginator.screens()[0];
    let segments = epub.content().segments(first);

    // The cover (12 characters) and the first 88 characters of chapter one
    assert_eq!(2, segments.len());
    assert_eq!("cover", segments[0].unit().id());
    assert_eq!(0..12, segments[0].range());
    assert_eq!("Example EPUB", segments[0].text());
    assert_eq!("c1", segments[1].unit().id());
    assert_eq!(0..88, segments[1].range());
    assert!(segments[1].text().ends_with("\nA second paragraph follows the "));

    let total = paginator
        .screens()
        .iter()
        .flat_map(|screen| epub.content().segments(screen))
        .map(|segment| segment.range().len())
        .sum::<usize>();
    assert_eq!(epub.content().locations().total_extent(), total);
}

#[test]
fn test_missing_resource() {
    let package = example_file(PACKAGE).replace("images/map.svg", "images/missing.svg");
    let result = Epub::load(zip_with(&[(PACKAGE, package.as_str())]));

    assert!(matches!(
        result,
        Err(EbookError::Resource(ResourceError::MissingResource { id, .. })) if id == "map"
    ));
}

#[test]
fn test_invalid_spine() {
    let duplicate = example_file(PACKAGE).replace(
        r#"<itemref idref="c2"/>"#,
        r#"<itemref idref="c2"/><itemref idref="c1"/>"#,
    );
    assert!(matches!(
        Epub::load(zip_with(&[(PACKAGE, duplicate.as_str())])),
        Err(EbookError::Resource(ResourceError::DuplicateIdref(id))) if id == "c1"
    ));

    let unknown =
        example_file(PACKAGE).replace(r#"<itemref idref="c2"/>"#, r#"<itemref idref="c9"/>"#);
    assert!(matches!(
        Epub::load(zip_with(&[(PACKAGE, unknown.as_str())])),
        Err(EbookError::Resource(ResourceError::InvalidIdref(id))) if id == "c9"
    ));
}

#[test]
fn test_location_of_each_resource() {
    let epub = TestEpub::Dir.open();
    let model = epub.content().locations();

    for id in epub.content().reading_order() {
        let extent = epub.content().get(id).unwrap().extent();
        assert_eq!(extent, model.extent(id).unwrap());
        assert!(model.validate(&Location::new(id.as_str(), extent)).is_ok());
    }
}

#[test]
fn test_html_and_plain_text_extent() {
    let package = example_file(PACKAGE)
        .replace(
            r#"<item id="remote-font""#,
            r#"<item id="appendix" href="text/appendix.html" media-type="text/html"/>
    <item id="notes" href="notes.txt" media-type="text/plain"/>
    <item id="remote-font""#,
        )
        .replace(
            r#"<itemref idref="c2"/>"#,
            r#"<itemref idref="c2"/>
    <itemref idref="appendix"/>
    <itemref idref="notes"/>"#,
        );
    let appendix = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Appendix</title></head>
<body><h1 id="appendix-title">Appendix</h1><p>Closing words<br>here.</p></body></html>"#;
    let bytes = zip_with(&[
        (PACKAGE, package.as_str()),
        ("OEBPS/text/appendix.html", appendix),
        ("OEBPS/notes.txt", "Plain notes"),
    ]);
    let epub = Epub::load(bytes).unwrap();
    let content = epub.content();

    let appendix = content.get("appendix").unwrap();
    assert_eq!(Some("Appendix\nClosing words\nhere."), appendix.text());
    assert_eq!(28, appendix.extent());
    assert_eq!(Some(0), appendix.anchor("appendix-title"));

    let notes = content.get("notes").unwrap();
    assert_eq!(Some("Plain notes"), notes.text());
    assert_eq!(11, notes.extent());

    let model = content.locations();
    assert_eq!(178 + 28 + 11, model.total_extent());
    assert_eq!(Some(Location::new("notes", 11)), model.end());
}
