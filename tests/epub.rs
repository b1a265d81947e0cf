/// EPUB integration tests
mod epub {
    mod content;
    mod location;
    mod metadata;
    mod nav;
    mod paginator;
    mod util;

    use crate::epub::util::{EXAMPLE_EPUB, TestEpub, zip_directory};
    use folio::Epub;
    use folio::ebook::errors::{ArchiveError, EbookError};
    use folio::epub::EpubSettings;
    use std::path::Path;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[test]
    #[wasm_bindgen_test]
    fn test_comparison() {
        let epub_a = TestEpub::File.open();
        let epub_b = TestEpub::Dir.open();

        assert_eq!(epub_a, epub_b);
        assert_eq!("OEBPS/package.opf", epub_a.package_file());
    }

    #[test]
    fn test_sources() {
        let bytes = zip_directory(Path::new(EXAMPLE_EPUB));
        let loaded = Epub::load(bytes.clone()).unwrap();
        let read = Epub::read(std::io::Cursor::new(bytes), EpubSettings::default()).unwrap();

        assert_eq!(loaded, read);
        assert_eq!(TestEpub::Dir.open(), loaded);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}
        let epub = TestEpub::Dir.open();
        assert_send_sync(&epub);

        // An `Epub` is detached from its source once loaded
        let handle = std::thread::spawn(move || epub.content().reading_order().len());
        assert_eq!(4, handle.join().unwrap());
    }

    #[test]
    fn test_unreadable_archive() {
        let result = Epub::open("tests/ebooks/nonexistent_epub");
        assert!(matches!(
            result,
            Err(EbookError::Archive(ArchiveError::UnreadableArchive { path: Some(_), .. }))
        ));

        let result = Epub::load(b"definitely not a zip".to_vec());
        assert!(matches!(
            result,
            Err(EbookError::Archive(ArchiveError::UnreadableArchive { path: None, .. }))
        ));
    }
}
