use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::parser::{EpubParser, EpubParserValidator};
use crate::ebook::errors::{EbookResult, ResourceError};
use crate::parser::xml::{XmlElement, XmlReader};
use crate::util::uri;
use std::collections::HashSet;

pub(crate) struct ManifestItem {
    pub(crate) id: String,
    /// Container path, or the raw href if [`Self::remote`].
    pub(crate) href: String,
    pub(crate) remote: bool,
    pub(crate) media_type: String,
    pub(crate) properties: String,
}

impl EpubParser<'_> {
    pub(super) fn parse_manifest(
        &self,
        reader: &mut XmlReader,
        parent_dir: &str,
    ) -> EbookResult<Vec<ManifestItem>> {
        let mut items = Vec::new();
        let mut ids = HashSet::new();

        while let Some(el) = Self::next_child(reader, bytes::MANIFEST, bytes::ITEM)? {
            // Required fields
            let id = self.require_attribute(el.get_attribute(consts::ID)?, "manifest > item[*id]")?;
            let href_raw =
                self.require_attribute(el.get_attribute(consts::HREF)?, "manifest > item[*href]")?;
            let mut media_type = self.require_attribute(
                el.get_attribute(consts::MEDIA_TYPE)?,
                "manifest > item[*media-type]",
            )?;

            // Optional fields
            let properties = el.get_attribute(consts::PROPERTIES)?.unwrap_or_default();

            if !ids.insert(id.clone()) {
                return Err(ResourceError::DuplicateItemId(id).into());
            }

            let remote = uri::has_scheme(&href_raw);
            let href = if remote {
                href_raw
            } else {
                uri::to_container_path(parent_dir, &href_raw)
            };

            // Set media_type to lowercase to enforce uniformity.
            media_type.make_ascii_lowercase();
            items.push(ManifestItem {
                id,
                href,
                remote,
                media_type,
                properties,
            });
        }

        Ok(items)
    }
}
