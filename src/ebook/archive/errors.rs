use crate::util::utf::UtfError;
use std::io;
use std::path::PathBuf;

/// Alias for `Result<T, ArchiveError>`.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Possible errors from the archive (zip file or directory) an [`Epub`](crate::Epub)
/// is loaded from.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    /// The archive itself is unreadable due to not existing,
    /// unsupported format, or malformed state.
    ///
    /// Path is [`None`] when the archive was supplied as a reader or byte buffer.
    #[error("[UnreadableArchive - `{path:?}`]: {source}")]
    UnreadableArchive {
        /// The root cause of this error.
        source: io::Error,
        /// The path responsible for triggering the error, if applicable.
        path: Option<PathBuf>,
    },

    /// The archive does not contain an entry at the given container path.
    #[error("[MissingEntry - `{0}`]: No such entry within the archive")]
    MissingEntry(String),

    /// The entry exists, although is unable to be read, typically I/O.
    #[error("[CannotRead - `{entry}`]: {source}")]
    CannotRead {
        /// The root cause of the error.
        source: io::Error,
        /// The container path responsible for triggering the error.
        entry: String,
    },

    /// The entry exists, although its content cannot be decoded as text.
    #[error("[InvalidText - `{entry}`]: {source}")]
    InvalidText {
        /// The root cause of the error.
        source: UtfError,
        /// The container path responsible for triggering the error.
        entry: String,
    },
}
