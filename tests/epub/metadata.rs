use crate::epub::util::{PACKAGE, TestEpub, example_file, zip_with};
use folio::Epub;
use folio::ebook::errors::{EbookError, ParseError};
use folio::ebook::metadata::{
    DC_NAMESPACE, DCTERMS_NAMESPACE, META_NAMESPACE, OPF_NAMESPACE, RENDITION_NAMESPACE,
};
use folio::epub::EpubSettings;
use folio::paginator::{LayoutConfig, RenditionLayout, SpreadMode};
use wasm_bindgen_test::wasm_bindgen_test;

const FOAF_NAMESPACE: &str = "http://xmlns.com/foaf/spec/";

fn load_package(package: &str, strict: bool) -> Result<Epub, EbookError> {
    Epub::read(
        std::io::Cursor::new(zip_with(&[(PACKAGE, package)])),
        EpubSettings::builder().strict(strict),
    )
}

#[test]
#[wasm_bindgen_test]
fn test_common() {
    let epub = TestEpub::File.open();
    let metadata = epub.metadata();

    assert_eq!("3.0", metadata.version());
    assert_eq!("Example EPUB", metadata.title().unwrap().value());
    assert_eq!("en", metadata.language().unwrap().value());
    assert_eq!(
        "2025-01-15T12:00:00Z",
        metadata.modified().unwrap().value()
    );

    let uid = metadata.unique_identifier().unwrap();
    assert_eq!(Some("uid"), uid.id());
    assert_eq!("urn:uuid:7c3e5a1e-2f4b-4d8a-9b61-0e2f3c4d5a6b", uid.value());
    assert_eq!(metadata.find(DC_NAMESPACE, "identifier")[0], uid);
}

#[test]
#[wasm_bindgen_test]
fn test_find() {
    let epub = TestEpub::File.open();
    let metadata = epub.metadata();

    let languages = metadata
        .find(DC_NAMESPACE, "language")
        .iter()
        .map(|language| language.value())
        .collect::<Vec<_>>();
    assert_eq!(vec!["en", "fr"], languages);

    let titles = metadata.find(DC_NAMESPACE, "title");
    assert_eq!(2, titles.len());
    assert_eq!("A Subtitle", titles[1].value());
    assert_eq!(Some("en"), titles[1].language());

    assert_eq!(1, metadata.find(DCTERMS_NAMESPACE, "modified").len());
    assert!(metadata.find(DC_NAMESPACE, "publisher").is_empty());
    // Refinements are only returned by `find_refined`
    assert!(metadata.find(META_NAMESPACE, "role").is_empty());
}

#[test]
#[wasm_bindgen_test]
fn test_refinements() {
    let epub = TestEpub::File.open();
    let metadata = epub.metadata();
    let creator = &metadata.find(DC_NAMESPACE, "creator")[0];

    assert_eq!("Jane Doe", creator.value());
    assert_eq!(3, creator.refinements().count());

    let role = creator.refinement("role").unwrap();
    assert_eq!("aut", role.value());
    assert_eq!(Some("role01"), role.id());
    assert_eq!(Some("creator01"), role.refines());
    assert_eq!(Some(*creator), role.refined());
    assert_eq!(metadata.by_id("role01"), Some(role));

    assert_eq!("Doe, Jane", creator.refinement("file-as").unwrap().value());

    let homepage = creator
        .refinements()
        .find(|refinement| refinement.namespace() == FOAF_NAMESPACE)
        .unwrap();
    assert_eq!("homepage", homepage.property());
    assert_eq!("https://example.com/jane", homepage.value());

    let types = metadata
        .find_refined(META_NAMESPACE, "title-type")
        .iter()
        .map(|kind| kind.value())
        .collect::<Vec<_>>();
    assert_eq!(vec!["main", "subtitle"], types);
}

#[test]
#[wasm_bindgen_test]
fn test_refines_manifest_item() {
    let epub = TestEpub::File.open();
    let refined = epub.metadata().find_refined(META_NAMESPACE, "title");

    assert_eq!(1, refined.len());
    assert_eq!("Chapitre un", refined[0].value());
    assert_eq!(Some("fr"), refined[0].language());
    assert_eq!(Some("c1"), refined[0].refines());
    // The target is a manifest item rather than a statement
    assert_eq!(None, refined[0].refined());
}

#[test]
#[wasm_bindgen_test]
fn test_legacy() {
    let epub = TestEpub::File.open();
    let metadata = epub.metadata();

    let isbn = metadata.by_id("isbn").unwrap();
    assert_eq!("9780000000002", isbn.value());
    assert_eq!("ISBN", isbn.refinement("scheme").unwrap().value());

    let cover = metadata.find(OPF_NAMESPACE, "cover");
    assert_eq!(1, cover.len());
    assert_eq!("cover-image", cover[0].value());
}

#[test]
#[wasm_bindgen_test]
fn test_rendition() {
    let epub = TestEpub::File.open();
    let metadata = epub.metadata();

    assert_eq!(
        "reflowable",
        metadata.find(RENDITION_NAMESPACE, "layout")[0].value()
    );

    let layout = LayoutConfig::from_metadata(metadata);
    assert_eq!(RenditionLayout::Reflowable, layout.rendition());
    assert_eq!(SpreadMode::Landscape, layout.spread());

    let package = example_file(PACKAGE).replace(
        r#"<meta property="rendition:layout">reflowable</meta>"#,
        r#"<meta property="rendition:layout">pre-paginated</meta>"#,
    );
    let epub = load_package(&package, true).unwrap();
    assert_eq!(
        RenditionLayout::Paginated,
        LayoutConfig::from_metadata(epub.metadata()).rendition()
    );
}

#[test]
fn test_invalid_refines() {
    let package = example_file(PACKAGE).replace(r##"refines="#c1""##, r##"refines="#c9""##);

    assert!(matches!(
        load_package(&package, true),
        Err(EbookError::Parse(ParseError::InvalidRefines(id))) if id == "c9"
    ));

    // Lenient mode keeps the statement, detached from any parent
    let epub = load_package(&package, false).unwrap();
    let refined = epub.metadata().find_refined(META_NAMESPACE, "title");
    assert_eq!(Some("c9"), refined[0].refines());
    assert_eq!(None, refined[0].refined());
}

#[test]
fn test_cyclic_refinement() {
    let package = example_file(PACKAGE).replace(
        r#"<dc:creator id="creator01">"#,
        r##"<meta refines="#role01" property="alternate-script" id="loop">Doe</meta>
    <dc:creator id="creator01">"##,
    );
    // `loop` and `role01` refine each other
    let package = package.replace(
        r##"<meta refines="#creator01" property="role""##,
        r##"<meta refines="#loop" property="role""##,
    );

    for strict in [true, false] {
        assert!(matches!(
            load_package(&package, strict),
            Err(EbookError::Parse(ParseError::CyclicRefinement(_)))
        ));
    }
}

#[test]
fn test_undeclared_prefix() {
    let package = example_file(PACKAGE).replace("foaf:homepage", "ex:homepage");

    assert!(matches!(
        load_package(&package, true),
        Err(EbookError::Parse(ParseError::InvalidPrefix(_)))
    ));

    let epub = load_package(&package, false).unwrap();
    let creator = &epub.metadata().find(DC_NAMESPACE, "creator")[0];
    assert_eq!(2, creator.refinements().count());
}
