use crate::ebook::archive::errors::ArchiveResult;
use crate::ebook::archive::{self, Archive, ArchiveError};
use std::io;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive as Zip;
use zip::result::ZipError;

pub(crate) struct ZipArchive<R>(Zip<R>);

impl<R: Read + Seek> ZipArchive<R> {
    /// `reader` (and optional `path` for a more descriptive error message).
    pub(crate) fn new(reader: R, path: Option<&Path>) -> ArchiveResult<Self> {
        Zip::new(reader)
            .map(Self)
            .map_err(|error| ArchiveError::UnreadableArchive {
                source: io::Error::from(error),
                path: path.map(Path::to_path_buf),
            })
    }
}

impl<R: Read + Seek> Archive for ZipArchive<R> {
    fn read_bytes(&mut self, entry: &str) -> ArchiveResult<Vec<u8>> {
        let mut zip_file = match self.0.by_name(archive::relative_entry(entry)) {
            Ok(zip_file) => zip_file,
            Err(ZipError::FileNotFound) => {
                return Err(ArchiveError::MissingEntry(entry.to_owned()));
            }
            Err(error) => {
                return Err(ArchiveError::CannotRead {
                    source: io::Error::from(error),
                    entry: entry.to_owned(),
                });
            }
        };
        let mut buf = Vec::new();

        zip_file
            .read_to_end(&mut buf)
            .map(|_| buf)
            .map_err(|error| ArchiveError::CannotRead {
                source: error,
                entry: entry.to_owned(),
            })
    }
}
