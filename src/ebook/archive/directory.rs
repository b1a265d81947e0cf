use crate::ebook::archive::errors::ArchiveResult;
use crate::ebook::archive::{self, Archive, ArchiveError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub(crate) struct DirectoryArchive(PathBuf);

impl DirectoryArchive {
    pub(crate) fn new(file: &Path) -> ArchiveResult<Self> {
        match file.canonicalize() {
            Ok(dir) if dir.is_dir() => Ok(Self(dir)),
            Ok(_) => Err(ArchiveError::UnreadableArchive {
                path: Some(file.to_path_buf()),
                source: io::Error::from(io::ErrorKind::NotADirectory),
            }),
            Err(source) => Err(ArchiveError::UnreadableArchive {
                path: Some(file.to_path_buf()),
                source,
            }),
        }
    }

    fn get_path(&self, entry: &str) -> ArchiveResult<PathBuf> {
        let path = self.0.join(archive::relative_entry(entry));
        let resolved = match path.canonicalize() {
            Ok(resolved) => resolved,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(ArchiveError::MissingEntry(entry.to_owned()));
            }
            Err(source) => {
                return Err(ArchiveError::CannotRead {
                    source,
                    entry: entry.to_owned(),
                });
            }
        };

        // Path traversal mitigation
        if resolved.starts_with(&self.0) && resolved.is_file() {
            Ok(resolved)
        } else {
            Err(ArchiveError::MissingEntry(entry.to_owned()))
        }
    }
}

impl Archive for DirectoryArchive {
    fn read_bytes(&mut self, entry: &str) -> ArchiveResult<Vec<u8>> {
        let path = self.get_path(entry)?;

        fs::read(&path).map_err(|source| ArchiveError::CannotRead {
            source,
            entry: entry.to_owned(),
        })
    }
}
