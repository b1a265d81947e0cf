mod guide;
mod manifest;
mod metadata;
mod spine;

pub(super) use guide::Guide;
pub(super) use manifest::ManifestItem;
pub(super) use spine::SpineEntry;

use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::parser::package::metadata::MetadataBuilder;
use crate::ebook::epub::parser::{EpubParser, EpubParserValidator};
use crate::ebook::errors::{EbookResult, ParseError, ResourceError};
use crate::ebook::metadata::MetadataIndex;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlElement, XmlReader};
use crate::util::uri;
use quick_xml::events::{BytesStart, Event};
use std::collections::{HashMap, HashSet};

/// Attributes of the `package` element inherited by its descendants.
pub(super) struct PackageAttributes {
    version: String,
    unique_id: Option<String>,
    /// Default language of metadata statements
    language: Option<String>,
    /// Declared `prefix: uri` mappings
    prefixes: HashMap<String, String>,
}

pub(super) struct PackageData {
    pub(super) metadata: MetadataIndex,
    pub(super) manifest: Vec<ManifestItem>,
    pub(super) spine: Vec<SpineEntry>,
    pub(super) guide: Guide,
    /// Manifest id referenced by `spine@toc`
    pub(super) ncx_id: Option<String>,
}

impl EpubParser<'_> {
    /// Parses the package `.opf` file and returns all
    /// necessary data required for further processing.
    pub(super) fn parse_opf(&self, package_file: &str, data: &[u8]) -> EbookResult<PackageData> {
        let parent_dir = uri::parent(package_file);
        let mut reader = XmlReader::new(package_file, data);
        let mut package = None;
        let mut metadata = None;
        let mut manifest = None;
        let mut spine = None;
        let mut guide = None;

        while let Some(event) = reader.next() {
            let Event::Start(el) = event? else {
                continue;
            };
            match el.local_name().as_ref() {
                bytes::PACKAGE => {
                    package.replace(self.parse_package(&el)?);
                }
                bytes::METADATA => {
                    let attributes = package.as_ref().ok_or(ParseError::NoPackageFound)?;
                    metadata.replace(self.parse_metadata(&mut reader, attributes)?);
                }
                bytes::MANIFEST => {
                    manifest.replace(self.parse_manifest(&mut reader, parent_dir)?);
                }
                bytes::SPINE => {
                    spine.replace(self.parse_spine(&mut reader, &el)?);
                }
                bytes::GUIDE => {
                    guide.replace(self.parse_guide(&mut reader)?);
                }
                _ => {}
            }
        }

        // Assert existence
        let package = package.ok_or(ParseError::NoPackageFound)?;
        let manifest = manifest.ok_or(ParseError::NoManifestFound)?;
        let (ncx_id, spine) = spine.ok_or(ParseError::NoSpineFound)?;
        let metadata = match metadata {
            Some(metadata) => metadata,
            None => {
                self.tolerate(ParseError::NoMetadataFound)?;
                MetadataBuilder::default()
            }
        };

        // Refinements may target manifest items and spine entries
        let known_ids = manifest
            .iter()
            .map(|item| item.id.as_str())
            .chain(spine.iter().filter_map(|entry| entry.id.as_deref()))
            .collect::<HashSet<_>>();
        let metadata = self.finish_metadata(metadata, package, &known_ids)?;

        Ok(PackageData {
            metadata,
            manifest,
            spine,
            guide: guide.unwrap_or_default(),
            ncx_id,
        })
    }

    fn parse_package(&self, package: &BytesStart) -> ParserResult<PackageAttributes> {
        // Required attributes
        let version =
            self.require_attribute(package.get_attribute(consts::VERSION)?, "package[*version]")?;
        let unique_id = package.get_attribute(consts::UNIQUE_ID)?;
        self.require_attribute(unique_id.as_deref(), "package[*unique-identifier]")?;

        // Optional attributes
        let language = package.get_attribute(consts::LANG)?;
        let prefixes = match package.get_attribute(consts::PREFIX)? {
            Some(prefix) => self.parse_prefixes(&prefix)?,
            None => HashMap::new(),
        };

        Ok(PackageAttributes {
            version,
            unique_id,
            language,
            prefixes,
        })
    }

    /// Parses `package@prefix`: whitespace-separated `prefix: uri` pairs.
    fn parse_prefixes(&self, value: &str) -> ParserResult<HashMap<String, String>> {
        let mut prefixes = HashMap::new();
        let mut tokens = value.split_ascii_whitespace();

        while let Some(token) = tokens.next() {
            match (token.strip_suffix(':'), tokens.next()) {
                (Some(prefix), Some(uri)) if !prefix.is_empty() => {
                    prefixes.insert(prefix.to_owned(), uri.to_owned());
                }
                _ => {
                    self.tolerate(ParseError::InvalidPrefix(value.to_owned()))?;
                    break;
                }
            }
        }
        Ok(prefixes)
    }

    /// Ensures the spine is non-empty, references only manifest items,
    /// and references each item at most once.
    pub(super) fn validate_spine(&self, package: &PackageData) -> Result<(), ResourceError> {
        if package.spine.is_empty() {
            return Err(ResourceError::EmptySpine);
        }
        let manifest_ids = package
            .manifest
            .iter()
            .map(|item| item.id.as_str())
            .collect::<HashSet<_>>();
        let mut seen = HashSet::new();

        for entry in &package.spine {
            if !manifest_ids.contains(entry.idref.as_str()) {
                return Err(ResourceError::InvalidIdref(entry.idref.clone()));
            }
            if !seen.insert(entry.idref.as_str()) {
                return Err(ResourceError::DuplicateIdref(entry.idref.clone()));
            }
        }
        Ok(())
    }

    /// Advances `reader` to the next `child` start element before the end of `parent`.
    fn next_child<'a>(
        reader: &mut XmlReader<'a>,
        parent: &[u8],
        child: &[u8],
    ) -> ParserResult<Option<BytesStart<'a>>> {
        while let Some(event) = reader.next() {
            match event? {
                Event::Start(el) if el.local_name().as_ref() == child => {
                    return Ok(Some(el));
                }
                Event::End(el) if el.local_name().as_ref() == parent => {
                    break;
                }
                _ => {}
            }
        }
        Ok(None)
    }
}
