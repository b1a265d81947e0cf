//! Loading an [`Epub`] without blocking an asynchronous runtime.
//!
//! Archive I/O and parsing happen on the blocking thread pool of `tokio`.
//! Once loaded, an [`Epub`] performs no further I/O,
//! so every query remains synchronous.

use crate::ebook::errors::{ArchiveError, EbookResult};
use crate::epub::{Epub, EpubSettings};
use std::io::{self, Cursor};
use std::path::PathBuf;
use tokio::task::{self, JoinError};

/// Opens an [`Epub`] from a zip file or unzipped directory.
///
/// # Errors
/// See [`Epub::open`].
/// A panicked or cancelled loading task is reported as
/// [`ArchiveError::UnreadableArchive`].
///
/// # Examples
/// ```
/// # use folio::epub::EpubSettings;
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> folio::ebook::errors::EbookResult<()> {
/// let epub = folio::async_ebook::open("tests/ebooks/example_epub", EpubSettings::default()).await?;
/// assert_eq!("Example EPUB", epub.metadata().title().unwrap().value());
/// # Ok(())
/// # }
/// ```
pub async fn open(
    path: impl Into<PathBuf>,
    settings: impl Into<EpubSettings>,
) -> EbookResult<Epub> {
    let path = path.into();
    let settings = settings.into();
    let origin = path.clone();

    task::spawn_blocking(move || Epub::open_with(path, settings))
        .await
        .map_err(|error| into_archive_error(error, Some(origin)))?
}

/// Loads an [`Epub`] from zip bytes held in memory.
///
/// # Errors
/// See [`open`].
pub async fn load(
    bytes: impl Into<Vec<u8>>,
    settings: impl Into<EpubSettings>,
) -> EbookResult<Epub> {
    let bytes = bytes.into();
    let settings = settings.into();

    task::spawn_blocking(move || Epub::read(Cursor::new(bytes), settings))
        .await
        .map_err(|error| into_archive_error(error, None))?
}

fn into_archive_error(error: JoinError, path: Option<PathBuf>) -> ArchiveError {
    ArchiveError::UnreadableArchive {
        source: io::Error::other(error),
        path,
    }
}
