//! Error-related types for an [`Epub`](crate::Epub) and its components.
//!
//! # Taxonomy
//! Construction-time errors are fatal to loading:
//! - [`ArchiveError`]: The container could not be read.
//! - [`ParseError`]: A container, package, navigation or content file is malformed.
//! - [`ResourceError`]: The manifest, spine or navigation targets are inconsistent.
//!
//! Query-time errors are recoverable; the caller decides a fallback:
//! - [`NotFoundError`]: An absent resource or navigation tree was requested.
//! - [`LocationError`]: A caller-supplied [`Location`](crate::ebook::location::Location)
//!   does not address the work.

pub use crate::ebook::archive::errors::{ArchiveError, ArchiveResult};
pub use crate::util::utf::UtfError;
use quick_xml::events::attributes::AttrError;
use std::string::FromUtf8Error;

/// Alias for `Result<T, EbookError>`.
pub type EbookResult<T> = Result<T, EbookError>;

/// Alias for `Result<T, LocationError>`.
pub type LocationResult<T> = Result<T, LocationError>;

/// Unified error type.
/// Possible errors when loading an [`Epub`](crate::Epub).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum EbookError {
    /// File access within the container has failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Malformed container, package, navigation or content source.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Manifest, spine or navigation references are inconsistent.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// A requested item does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// Possible parse errors from an [`Epub`](crate::Epub).
///
/// # Variants
/// When parsing, error variants flagged with `*` are ignored when
/// [`EpubSettings::strict`](crate::epub::EpubSettings::strict) is disabled.
/// - [`Malformed`](ParseError::Malformed)
/// - [`InvalidAttribute`](ParseError::InvalidAttribute)
/// - [`InvalidUtf8`](ParseError::InvalidUtf8)
/// - [`NoOpfReference`](ParseError::NoOpfReference)
/// - [`NoPackageFound`](ParseError::NoPackageFound)
/// - [`NoMetadataFound`](ParseError::NoMetadataFound)*
/// - [`NoManifestFound`](ParseError::NoManifestFound)
/// - [`NoSpineFound`](ParseError::NoSpineFound)
/// - [`MissingAttribute`](ParseError::MissingAttribute)*
/// - [`InvalidPrefix`](ParseError::InvalidPrefix)*
/// - [`InvalidRefines`](ParseError::InvalidRefines)*
/// - [`CyclicRefinement`](ParseError::CyclicRefinement)
/// - [`NoTocFound`](ParseError::NoTocFound)*
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    /// File content unexpectedly causes an internal XML parser error.
    #[error("[Malformed - `{file}`]: {source}")]
    Malformed {
        /// The root cause of the error.
        source: quick_xml::Error,
        /// The container path of the malformed file.
        file: String,
    },

    /// An element contains a malformed attribute.
    #[error(transparent)]
    InvalidAttribute(#[from] AttrError),

    /// An attribute value is not valid UTF-8.
    #[error(transparent)]
    InvalidUtf8(#[from] FromUtf8Error),

    /// The container does not contain a `rootfile` reference
    /// pointing to a package `.opf` file.
    ///
    /// Error Source: `META-INF/container.xml`
    #[error("Missing `rootfile` element referencing an `.opf` file in `META-INF/container.xml`")]
    NoOpfReference,

    /// The `package` element is not found.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `package` element")]
    NoPackageFound,

    /// The `metadata` element is not found.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `metadata` element")]
    NoMetadataFound,

    /// The `manifest` element is not found.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `manifest` element")]
    NoManifestFound,

    /// The `spine` element is not found.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `spine` element")]
    NoSpineFound,

    /// A required attribute is missing from an element.
    #[error("Required attribute missing: {0}")]
    MissingAttribute(String),

    /// The `prefix` field on the `package` element is malformed.
    ///
    /// A well-formed value consists of space-separated `prefix: uri` pairs.
    ///
    /// Error Source: `.opf` file
    #[error("Invalid package `prefix`: {0}")]
    InvalidPrefix(String),

    /// The `refines` field of a refinement references a non-existent metadata entry.
    ///
    /// Error Source: `.opf` file
    #[error("Invalid `refines` field referencing a non-existent id: {0}")]
    InvalidRefines(String),

    /// A cycle has been detected through a refinement `<meta>` chain.
    ///
    /// # Example
    /// ```xml
    /// <meta id="r1" refines="#r2" property="my-property-1">data1</meta>
    /// <meta id="r2" refines="#r1" property="my-property-2">data2</meta>
    /// ```
    ///
    /// Error Source: `.opf` file
    #[error("Cycle detected in metadata refinements; affected ID: {0}")]
    CyclicRefinement(String),

    /// No navigation source provides a non-empty table of contents.
    ///
    /// Error Source: The navigation `.xhtml` or `.ncx` file(s).
    #[error("No table of contents (nav or navMap) with entries found")]
    NoTocFound,
}

/// Inconsistencies between the manifest, spine, container entries and
/// navigation targets.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ResourceError {
    /// An `item` element within the manifest contains a duplicate `id`.
    #[error("Duplicate manifest `item` ID found: {0}")]
    DuplicateItemId(String),

    /// A manifest item is declared, but its file is absent from the container.
    #[error("Manifest item `{id}` references a missing container entry: {href}")]
    MissingResource {
        /// The manifest item ID.
        id: String,
        /// The container path of the missing entry.
        href: String,
    },

    /// A spine entry (`itemref`) references a non-existent manifest item.
    #[error(
        "Invalid spine entry `idref` field that references a non-existent manifest entry by ID: {0}"
    )]
    InvalidIdref(String),

    /// A manifest item is referenced more than once by the spine.
    #[error("Duplicate spine entry `idref` found: {0}")]
    DuplicateIdref(String),

    /// The spine contains no entries; there is no reading order.
    #[error("The spine contains no `itemref` entries")]
    EmptySpine,

    /// The `toc` field on the `spine` element references a non-existent manifest item.
    #[error("Invalid spine `toc` field that references a non-existent manifest entry by ID: {0}")]
    InvalidNcxReference(String),

    /// A navigation entry targets a location outside the reading order.
    #[error("[DanglingTarget - `{file}`]: `{href}` does not resolve to a reading-order location")]
    DanglingTarget {
        /// The container path of the navigation source.
        file: String,
        /// The raw href of the offending entry.
        href: String,
    },
}

/// A queried item does not exist.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    /// No resource with the given manifest ID exists.
    #[error("No resource found with ID: {0}")]
    Resource(String),

    /// No navigation tree of the given kind exists.
    #[error("No navigation tree found of kind: {0}")]
    Tree(String),
}

/// A caller-supplied location does not address the work.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The resource ID is not part of the reading order.
    #[error("Resource `{0}` is not part of the reading order")]
    UnknownResource(String),

    /// The offset exceeds the extent of the resource.
    #[error("Offset `{offset}` exceeds the extent `{extent}` of resource `{resource}`")]
    OffsetOutOfRange {
        /// The resource ID of the location.
        resource: String,
        /// The requested offset.
        offset: usize,
        /// The extent of the resource; the greatest valid offset.
        extent: usize,
    },
}
