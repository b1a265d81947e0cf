//! # folio
//! The core of an EPUB reading system: content addressing,
//! screen-based pagination, navigation trees and metadata.
//!
//! # Features
//! - [`Epub`]: Loads EPUB `2` and `3` packages from a zip file,
//!   an unzipped directory, a reader or a byte buffer.
//! - [`ContentStore`](ebook::content::ContentStore): Every manifest resource,
//!   the reading order and the visible text of spine documents.
//! - [`LocationModel`](ebook::location::LocationModel): A total order over
//!   every [`Location`](ebook::location::Location) within a work.
//! - [`Navigation`](ebook::nav::Navigation): Table of contents, page list,
//!   landmarks and custom navigation groups resolved to locations.
//! - [`MetadataIndex`](ebook::metadata::MetadataIndex): Namespaced metadata
//!   statements with their refinements.
//! - [`Paginator`](paginator::Paginator): Screens computed from a
//!   [`LayoutConfig`](paginator::LayoutConfig), with navigation history.
//!
//! Rendering is left to the caller;
//! everything exposed here is a read-only query surface
//! except the [`Paginator`](paginator::Paginator).
//!
//! # Default crate features
//! - `prelude`: Convenience prelude ***only*** including common types
//!   (e.g., [`Epub`], [`Paginator`](paginator::Paginator)).
//!
//! # Optional crate features
//! - `async-tokio`: Loading an [`Epub`] on the blocking thread pool of `tokio`.
//!
//! # Logging
//! Diagnostics are emitted through the [`log`] facade.
//! When [`EpubSettings::strict`](epub::EpubSettings::strict) is disabled,
//! each tolerated malformation is logged as a warning.
//!
//! # Examples
//! - Opening an [`Epub`] and walking its table of contents:
//! ```
//! # use folio::Epub;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let epub = Epub::open("tests/ebooks/example_epub")?;
//!
//! let toc = epub.navigation().contents().expect("toc is present");
//! for chapter in toc.children() {
//!     // Each target is a location within the reading order
//!     println!("{} -> {:?}", chapter.label(), chapter.target());
//! }
//! # Ok(())
//! # }
//! ```
//! - Paginating and jumping to a table of contents entry:
//! ```
//! # use folio::Epub;
//! # use folio::paginator::LayoutConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let epub = Epub::open("tests/ebooks/example_epub")?;
//! let layout = LayoutConfig::from_metadata(epub.metadata());
//! let mut paginator = epub.paginator_with(layout)?;
//!
//! let toc = epub.navigation().contents().expect("toc is present");
//! if let Some(target) = toc.children().last().and_then(|item| item.target()) {
//!     let screen = paginator.goto_location(target)?;
//!     println!("Screen #{}: {} to {}", screen.index(), screen.begin(), screen.end());
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "async-tokio")]
pub mod async_ebook;
pub mod ebook;
pub mod paginator;
mod parser;
mod util;

pub use self::ebook::epub::{self, Epub};

/// The prelude, containing commonly used types.
#[cfg(feature = "prelude")]
pub mod prelude {
    pub use crate::ebook::content::{ContentStore, ContentUnit, Segment};
    pub use crate::ebook::errors::{EbookError, EbookResult};
    pub use crate::ebook::location::{Location, LocationModel};
    pub use crate::ebook::metadata::{MetadataIndex, MetadataStatement};
    pub use crate::ebook::nav::{NavItem, NavKind, Navigation};
    pub use crate::epub::{Epub, EpubSettings, TocFormat};
    pub use crate::paginator::{LayoutConfig, Paginator, PaginatorError, Screen};
}
