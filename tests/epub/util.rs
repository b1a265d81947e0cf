use folio::Epub;
use folio::epub::EpubSettings;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const EXAMPLE_EPUB: &str = "tests/ebooks/example_epub";
pub const PACKAGE: &str = "OEBPS/package.opf";
pub const NAV: &str = "OEBPS/nav.xhtml";

pub enum TestEpub {
    /// Unzipped Epub `2` + `3` directory
    ///
    /// Mapped to: [`EXAMPLE_EPUB`]
    Dir,
    /// Zipped Epub `2` + `3` file, built in memory from [`EXAMPLE_EPUB`]
    File,
}

impl TestEpub {
    pub fn open(self) -> Epub {
        self.open_with(EpubSettings::default())
    }

    pub fn open_with(self, settings: impl Into<EpubSettings>) -> Epub {
        match self {
            Self::Dir => Epub::open_with(EXAMPLE_EPUB, settings).unwrap(),
            Self::File => {
                let bytes = zip_directory(Path::new(EXAMPLE_EPUB));
                Epub::read(Cursor::new(bytes), settings).unwrap()
            }
        }
    }
}

/// Zips the contents of `dir` with an uncompressed leading `mimetype` entry.
pub fn zip_directory(dir: &Path) -> Vec<u8> {
    let mut entries = Vec::new();
    collect_entries(dir, dir, &mut entries);
    entries.sort_by_key(|(name, _)| name != "mimetype");

    let entries = entries
        .iter()
        .map(|(name, data)| (name.as_str(), data.as_slice()))
        .collect::<Vec<_>>();
    zip_entries(&entries)
}

/// Builds a zip archive from `(entry name, content)` pairs.
pub fn zip_entries(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for &(name, data) in entries {
        let options = if name == "mimetype" { stored } else { deflated };
        zip.start_file(name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Zips the example epub with the given `(entry name, content)` replacements.
///
/// Entries absent from the example epub are added.
pub fn zip_with(replacements: &[(&str, &str)]) -> Vec<u8> {
    let root = Path::new(EXAMPLE_EPUB);
    let mut entries = Vec::new();
    collect_entries(root, root, &mut entries);
    entries.sort_by_key(|(name, _)| name != "mimetype");

    for &(entry, replacement) in replacements {
        match entries.iter_mut().find(|(name, _)| name.as_str() == entry) {
            Some((_, data)) => *data = replacement.as_bytes().to_vec(),
            None => entries.push((entry.to_owned(), replacement.as_bytes().to_vec())),
        }
    }
    let entries = entries
        .iter()
        .map(|(name, data)| (name.as_str(), data.as_slice()))
        .collect::<Vec<_>>();
    zip_entries(&entries)
}

/// Reads an entry of the example epub (e.g., `OEBPS/package.opf`).
pub fn example_file(entry: &str) -> String {
    fs::read_to_string(Path::new(EXAMPLE_EPUB).join(entry)).unwrap()
}

fn collect_entries(root: &Path, dir: &Path, entries: &mut Vec<(String, Vec<u8>)>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();

        if path.is_dir() {
            collect_entries(root, &path, entries);
        } else {
            let name = path
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            entries.push((name, fs::read(&path).unwrap()));
        }
    }
}
