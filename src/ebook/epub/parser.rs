mod container;
mod content;
pub(crate) mod nav;
mod package;

use crate::ebook::archive::Archive;
use crate::ebook::archive::errors::ArchiveError;
use crate::ebook::content::ContentStore;
use crate::ebook::epub::consts;
use crate::ebook::epub::parser::package::PackageData;
use crate::ebook::epub::{EpubSettings, TocFormat};
use crate::ebook::errors::{EbookResult, ParseError, ResourceError};
use crate::ebook::metadata::MetadataIndex;
use crate::ebook::nav::{NavKind, Navigation};
use crate::parser::ParserResult;
use log::{debug, warn};
use std::fmt::Display;

pub(super) struct ParsedContent {
    pub(super) package_file: String,
    pub(super) content: ContentStore,
    pub(super) metadata: MetadataIndex,
    pub(super) navigation: Navigation,
}

/// Shared strictness handling for every parser stage.
pub(crate) trait EpubParserValidator {
    fn is_strict(&self) -> bool;

    /// Required attribute value.
    ///
    /// If `attribute_value` is [`None`],
    /// its [`Default`] is returned if `strict` mode is disabled.
    /// Otherwise, an error is returned.
    fn require_attribute<T: Default>(
        &self,
        attribute_value: Option<T>,
        error_message: &'static str,
    ) -> ParserResult<T> {
        match attribute_value {
            Some(value) => Ok(value),
            None if self.is_strict() => Err(ParseError::MissingAttribute(error_message.to_owned())),
            None => {
                warn!("Tolerating missing required attribute: {error_message}");
                Ok(T::default())
            }
        }
    }

    /// Returns `error` in strict mode; otherwise logs and discards it.
    fn tolerate<E: Display>(&self, error: E) -> Result<(), E> {
        if self.is_strict() {
            Err(error)
        } else {
            warn!("Tolerating malformed content: {error}");
            Ok(())
        }
    }
}

pub(super) struct EpubParser<'a> {
    settings: &'a EpubSettings,
    archive: &'a mut dyn Archive,
}

impl<'a> EpubParser<'a> {
    pub(super) fn new(settings: &'a EpubSettings, archive: &'a mut dyn Archive) -> Self {
        Self { settings, archive }
    }

    pub(super) fn parse(&mut self) -> EbookResult<ParsedContent> {
        // Parse "META-INF/container.xml"
        let container = self.read_resource(consts::CONTAINER)?;
        let package_file = self.parse_container(container.as_bytes())?;
        debug!("Package document located at `{package_file}`");

        // Parse "package.opf"
        let package_content = self.read_resource(&package_file)?;
        let package = self.parse_opf(&package_file, package_content.as_bytes())?;
        self.validate_spine(&package)?;

        let PackageData {
            metadata,
            manifest,
            spine,
            guide,
            ncx_id,
        } = package;

        let content = self.build_content(manifest, spine)?;
        debug!(
            "Loaded {} resources; reading order of {}",
            content.len(),
            content.reading_order().len(),
        );

        let navigation = self.parse_navigation(&content, &package_file, ncx_id, guide)?;

        Ok(ParsedContent {
            package_file,
            content,
            metadata,
            navigation,
        })
    }

    fn read_resource(&mut self, file: &str) -> Result<String, ArchiveError> {
        self.archive.read_str(file)
    }

    /// Parses every navigation source and merges them by preference:
    /// kinds of the preferred source take precedence,
    /// the other source only fills absent kinds.
    fn parse_navigation(
        &self,
        content: &ContentStore,
        package_file: &str,
        ncx_id: Option<String>,
        guide: package::Guide,
    ) -> EbookResult<Navigation> {
        let xhtml = content
            .iter()
            .find(|unit| unit.has_property(consts::NAV_PROPERTY) && !unit.is_remote());
        let ncx = match ncx_id {
            Some(id) => Some(
                content
                    .get(&id)
                    .map_err(|_| ResourceError::InvalidNcxReference(id.clone()))?,
            ),
            None => content
                .iter()
                .find(|unit| unit.media_type() == consts::NCX_TYPE && !unit.is_remote()),
        };

        let mut sources = Vec::new();
        if let Some(unit) = xhtml {
            sources.push((nav::NavSource::Xhtml, unit));
        }
        if let Some(unit) = ncx {
            sources.push((nav::NavSource::Ncx, unit));
        }
        if self.settings.preferred_toc == TocFormat::Ncx {
            sources.reverse();
        }

        let mut navigation = Navigation::default();
        for (source, unit) in sources {
            debug!("Parsing navigation source `{}`", unit.href());
            let parsed =
                nav::parse_nav(source, content, unit.href(), unit.data(), self.is_strict())?;
            navigation.fill_from(parsed);
        }

        // The EPUB 2 guide only serves as a fallback
        if !navigation.contains(&NavKind::Landmarks) && !guide.is_empty() {
            let landmarks = guide.resolve(content, package_file, self.is_strict())?;
            navigation.push(NavKind::Landmarks, landmarks);
        }

        let has_toc = navigation
            .contents()
            .is_some_and(|toc| !toc.children().is_empty());
        if !has_toc {
            self.tolerate(ParseError::NoTocFound)?;
        }

        Ok(navigation)
    }
}

impl EpubParserValidator for EpubParser<'_> {
    fn is_strict(&self) -> bool {
        self.settings.strict
    }
}
