//! The Electronic Publication ([`Epub`]) module.
//!
//! Supports EPUB versions `2` and `3`.
//!
//! For more information regarding the EPUB spec, see:
//! <https://www.w3.org/TR/epub>

pub(crate) mod consts;
pub(crate) mod parser;

use crate::ebook::archive::zip::ZipArchive;
use crate::ebook::archive::{self, Archive};
use crate::ebook::content::ContentStore;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::errors::EbookResult;
use crate::ebook::metadata::MetadataIndex;
use crate::ebook::nav::Navigation;
use crate::paginator::{LayoutConfig, Paginator, PaginatorResult};
use log::debug;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Electronic Publication (EPUB)
///
/// Provides access to the following contents of an epub:
/// - [`ContentStore`]: Resources and the reading order they form
/// - [`Navigation`]: Table of contents, page list, landmarks and custom groups
/// - [`MetadataIndex`]: Metadata statements (title, language, identifiers)
///
/// All container entries are read upon loading;
/// an [`Epub`] holds no file handle and is `Send + Sync`.
///
/// # Configuration
/// Parsing can be configured using [`EpubSettings`].
///
/// # Renditions
/// Multi-rendition EPUBs are not supported,
/// and the first OPF `rootfile` will always be selected.
///
/// # Examples
/// - Paginating the contents of an epub:
/// ```
/// # use folio::Epub;
/// # use folio::paginator::LayoutConfig;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let epub = Epub::open("tests/ebooks/example_epub")?;
///
/// // Retrieving the main title
/// assert_eq!("Example EPUB", epub.metadata().title().unwrap().value());
///
/// // Printing the text of each screen
/// let mut paginator = epub.paginator_with(LayoutConfig::builder().width(400.0).build()?)?;
/// loop {
///     let screen = paginator.current_screen()?;
///     for segment in epub.content().segments(screen) {
///         println!("{}", segment.text());
///     }
///     if paginator.next_screen().is_err() {
///         break;
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Epub {
    package_file: String,
    content: ContentStore,
    metadata: MetadataIndex,
    navigation: Navigation,
}

impl Epub {
    /// Opens an [`Epub`] from the given [`Path`] with default [`EpubSettings`].
    ///
    /// The provided path may be an EPUB **file** or **directory** containing the
    /// contents of an unzipped EPUB.
    ///
    /// # Errors
    /// - [`Archive`](crate::ebook::errors::EbookError::Archive): Missing or unreadable EPUB files.
    /// - [`Parse`](crate::ebook::errors::EbookError::Parse): Malformed EPUB content.
    /// - [`Resource`](crate::ebook::errors::EbookError::Resource):
    ///   Inconsistent manifest, spine or navigation references.
    ///
    /// # See Also
    /// - [`Self::open_with`] to specify settings.
    /// - [`Self::read`] to open from a reader.
    ///
    /// # Examples
    /// - Opening from an EPUB file:
    ///   ```no_run
    ///   # use folio::Epub;
    ///   let epub = Epub::open("/ebooks/zipped.epub");
    ///   ```
    /// - Opening from a directory containing the contents of an unzipped EPUB:
    ///   ```no_run
    ///   # use folio::Epub;
    ///   let epub = Epub::open("/ebooks/unzipped_epub_dir");
    ///   ```
    pub fn open(path: impl AsRef<Path>) -> EbookResult<Self> {
        Self::open_with(path, EpubSettings::default())
    }

    /// Opens an [`Epub`] from the given [`Path`] with the specified [`EpubSettings`].
    ///
    /// See [`Self::open`] for more details.
    ///
    /// # Examples
    /// - Opening an EPUB with settings:
    /// ```
    /// # use folio::ebook::errors::EbookResult;
    /// # use folio::epub::{Epub, EpubSettings, TocFormat};
    /// # fn main() -> EbookResult<()> {
    /// let epub = Epub::open_with(
    ///     "tests/ebooks/example_epub",
    ///     EpubSettings::builder()
    ///         .strict(false)
    ///         .preferred_toc(TocFormat::Ncx),
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open_with(
        path: impl AsRef<Path>,
        settings: impl Into<EpubSettings>,
    ) -> EbookResult<Self> {
        let mut archive = archive::get_archive(path.as_ref())?;
        Self::new(&settings.into(), archive.as_mut())
    }

    /// With the specified [`EpubSettings`],
    /// opens an EPUB from any implementation of [`Read`] + [`Seek`].
    ///
    /// # Errors
    /// See [`Self::open`].
    ///
    /// # Examples
    /// - Opening from a [`File`](std::fs::File) directly:
    /// ```no_run
    /// # use folio::epub::{Epub, EpubSettings};
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// let epub_file = std::fs::File::open("tests/ebooks/example.epub")?;
    /// let epub = Epub::read(epub_file, EpubSettings::default())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn read<R: Read + Seek>(reader: R, settings: impl Into<EpubSettings>) -> EbookResult<Self> {
        let mut archive = ZipArchive::new(reader, None)?;
        Self::new(&settings.into(), &mut archive)
    }

    /// Loads an EPUB from zip bytes held in memory with default [`EpubSettings`].
    ///
    /// # Errors
    /// See [`Self::open`].
    pub fn load(bytes: impl Into<Vec<u8>>) -> EbookResult<Self> {
        Self::read(Cursor::new(bytes.into()), EpubSettings::default())
    }

    /// The container path of the package `.opf` file (e.g., `OEBPS/package.opf`).
    ///
    /// This is ***not*** a filesystem path.
    /// Container paths are relative to the container root and percent-decoded.
    pub fn package_file(&self) -> &str {
        &self.package_file
    }

    /// Every manifest resource and the reading order.
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// Data associated with the epub, such as title and language.
    pub fn metadata(&self) -> &MetadataIndex {
        &self.metadata
    }

    /// The navigation trees (table of contents, page list, landmarks).
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Returns an unpaginated [`Paginator`] positioned at the start of the work.
    ///
    /// A layout must be applied with [`Paginator::set_layout`] before navigating.
    pub fn paginator(&self) -> Paginator<'_> {
        Paginator::new(self.content.locations())
    }

    /// Returns a [`Paginator`] with screens computed for the given `layout`,
    /// positioned on the first screen.
    ///
    /// # Errors
    /// [`InvalidConfig`](crate::paginator::PaginatorError::InvalidConfig):
    /// The layout leaves no usable area.
    pub fn paginator_with(&self, layout: LayoutConfig) -> PaginatorResult<Paginator<'_>> {
        Paginator::with_layout(self.content.locations(), layout)
    }

    // `EpubSettings` are not stored within the `Epub` struct.
    fn new(settings: &EpubSettings, archive: &mut dyn Archive) -> EbookResult<Self> {
        let data = EpubParser::new(settings, archive).parse()?;
        debug!(
            "Loaded `{}` with {} navigation tree(s)",
            data.package_file,
            data.navigation.kinds().count(),
        );

        Ok(Self {
            package_file: data.package_file,
            content: data.content,
            metadata: data.metadata,
            navigation: data.navigation,
        })
    }
}

/// The navigation source preferred when both an EPUB 3 navigation document
/// and an EPUB 2 NCX are present.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TocFormat {
    /// EPUB 3 navigation document (`nav` elements).
    #[default]
    Xhtml,
    /// EPUB 2 navigation center extended (`navMap`, `pageList`).
    Ncx,
}

/// EPUB-specific settings upon parsing an [`Epub`].
///
/// To create a mutable settings instance, see
/// [`EpubSettings::builder`] or [`EpubSettings::default`].
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct EpubSettings {
    /// Prefer a navigation source over another.
    ///
    /// Each navigation kind (toc, page list, landmarks) is taken from
    /// the preferred source. If the preferred source lacks a kind,
    /// the other source supplies it instead.
    ///
    /// **This primarily affects EPUB3 ebooks that
    /// are backwards-compatible with EPUB2.**
    ///
    /// Default: [`TocFormat::Xhtml`]
    pub preferred_toc: TocFormat,
    /// When set to `true`, ensures an EPUB conforms to the following:
    /// - Has a `metadata` section and a **table of contents** with entries.
    /// - Elements (i.e., `item`, `itemref`) have their required attributes present.
    /// - Metadata prefixes are declared and every `refines` resolves.
    /// - Navigation targets name an element in a reading-order resource.
    ///
    /// If any of the conditions are not met,
    /// an error will be returned.
    /// Otherwise, each defect is logged as a warning and tolerated.
    ///
    /// **This setting does not validate that an EPUB fully conforms to EPUB.
    /// However, it will refuse further processing if malformations are found.**
    ///
    /// Default: `true`
    pub strict: bool,
}

impl EpubSettings {
    /// Returns a builder to create an [`EpubSettings`] instance.
    pub fn builder() -> EpubSettingsBuilder {
        EpubSettingsBuilder(Self::default())
    }
}

impl Default for EpubSettings {
    fn default() -> Self {
        Self {
            preferred_toc: TocFormat::Xhtml,
            strict: true,
        }
    }
}

impl From<EpubSettingsBuilder> for EpubSettings {
    fn from(value: EpubSettingsBuilder) -> Self {
        value.build()
    }
}

/// Builder to construct an [`EpubSettings`] instance.
///
/// # Examples
/// - Passing a builder to open an [`Epub`] with:
/// ```
/// # use folio::ebook::errors::EbookResult;
/// # use folio::epub::{Epub, EpubSettings, TocFormat};
/// # fn main() -> EbookResult<()> {
/// let epub = Epub::open_with(
///     "tests/ebooks/example_epub",
///     EpubSettings::builder().preferred_toc(TocFormat::Ncx),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EpubSettingsBuilder(EpubSettings);

impl EpubSettingsBuilder {
    /// Turn this builder into an [`EpubSettings`] instance.
    pub fn build(self) -> EpubSettings {
        self.0
    }

    /// See [`EpubSettings::preferred_toc`].
    pub fn preferred_toc(mut self, format: TocFormat) -> Self {
        self.0.preferred_toc = format;
        self
    }

    /// See [`EpubSettings::strict`].
    pub fn strict(mut self, strict: bool) -> Self {
        self.0.strict = strict;
        self
    }
}
