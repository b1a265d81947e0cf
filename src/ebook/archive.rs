pub(super) mod directory;
pub(super) mod errors;
pub(super) mod zip;

use crate::ebook::archive::directory::DirectoryArchive;
use crate::ebook::archive::errors::{ArchiveError, ArchiveResult};
use crate::ebook::archive::zip::ZipArchive;
use crate::util;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read access to the entries of an EPUB container.
///
/// Entries are addressed by container path: percent-decoded,
/// normalized and relative to the container root (`OEBPS/c1.xhtml`).
pub(crate) trait Archive {
    fn read_bytes(&mut self, entry: &str) -> ArchiveResult<Vec<u8>>;

    fn read_str(&mut self, entry: &str) -> ArchiveResult<String> {
        util::utf::into_utf8_str(self.read_bytes(entry)?).map_err(|source| {
            ArchiveError::InvalidText {
                source,
                entry: entry.to_owned(),
            }
        })
    }
}

/// Helper method for archives that support resolving against paths.
fn relative_entry(entry: &str) -> &str {
    // ZipArchive and DirectoryArchive only support relative paths.
    //
    // `/EPUB/OEBPS/toc.xhtml` -> `EPUB/OEBPS/toc.xhtml`
    entry.strip_prefix('/').unwrap_or(entry)
}

/// Unzip the file if it is not directory.
///
/// If it is, the contents can be accessed directly,
/// which makes using a zip file unnecessary.
pub(crate) fn get_archive(path: &Path) -> ArchiveResult<Box<dyn Archive>> {
    Ok(if path.is_file() {
        let file = File::open(path).map_err(|error| ArchiveError::UnreadableArchive {
            source: error,
            path: Some(path.to_path_buf()),
        })?;
        Box::new(ZipArchive::new(BufReader::new(file), Some(path))?)
    } else {
        Box::new(DirectoryArchive::new(path)?)
    })
}
