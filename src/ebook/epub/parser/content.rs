use crate::ebook::archive::errors::ArchiveError;
use crate::ebook::content::text::TextContent;
use crate::ebook::content::{ContentStore, ContentUnit};
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::parser::package::{ManifestItem, SpineEntry};
use crate::ebook::errors::{EbookError, EbookResult, ResourceError};
use crate::util::utf;
use log::debug;
use std::collections::HashSet;

const PLAIN_TEXT: &str = "text/plain";

impl EpubParser<'_> {
    /// Reads every local manifest item and extracts the visible text
    /// of textual reading-order resources.
    pub(super) fn build_content(
        &mut self,
        manifest: Vec<ManifestItem>,
        spine: Vec<SpineEntry>,
    ) -> EbookResult<ContentStore> {
        let reading_order = spine.iter().map(|entry| entry.idref.as_str()).collect::<HashSet<_>>();
        let mut units = Vec::with_capacity(manifest.len());

        for item in manifest {
            let in_spine = reading_order.contains(item.id.as_str());
            let unit = if item.remote {
                debug!("Manifest item `{}` is remote: {}", item.id, item.href);
                ContentUnit::new(item.id, item.href, item.media_type, item.properties, None)
            } else {
                self.read_unit(item, in_spine)?
            };
            units.push(unit);
        }

        let non_linear = spine
            .iter()
            .filter(|entry| !entry.linear)
            .map(|entry| entry.idref.clone())
            .collect();
        let reading_order = spine.into_iter().map(|entry| entry.idref).collect();

        Ok(ContentStore::new(units, reading_order, non_linear))
    }

    fn read_unit(&mut self, item: ManifestItem, in_spine: bool) -> EbookResult<ContentUnit> {
        let data = self.archive.read_bytes(&item.href).map_err(|error| match error {
            ArchiveError::MissingEntry(_) => ResourceError::MissingResource {
                id: item.id.clone(),
                href: item.href.clone(),
            }
            .into(),
            error => EbookError::from(error),
        })?;

        let text = if in_spine {
            Self::extract_text(&item, &data)?
        } else {
            None
        };

        let mut unit = ContentUnit::new(
            item.id,
            item.href,
            item.media_type,
            item.properties,
            Some(data),
        );
        if let Some(text) = text {
            unit.set_text(text);
        }
        Ok(unit)
    }

    fn extract_text(item: &ManifestItem, data: &[u8]) -> EbookResult<Option<TextContent>> {
        let media_type = item.media_type.as_str();
        let is_markup = matches!(media_type, "application/xhtml+xml" | "text/html");

        if !is_markup && media_type != PLAIN_TEXT {
            // Atomic resource (e.g., an image)
            return Ok(None);
        }

        let decoded = utf::into_utf8_str(data.to_vec()).map_err(|source| ArchiveError::InvalidText {
            source,
            entry: item.href.clone(),
        })?;

        Ok(Some(if is_markup {
            TextContent::from_markup(&item.href, decoded.as_bytes())?
        } else {
            TextContent::plain(decoded)
        }))
    }
}
