use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::parser::{EpubParser, EpubParserValidator};
use crate::parser::ParserResult;
use crate::parser::xml::{XmlElement, XmlReader};
use quick_xml::events::BytesStart;

pub(crate) struct SpineEntry {
    pub(crate) idref: String,
    pub(crate) id: Option<String>,
    pub(crate) linear: bool,
}

impl EpubParser<'_> {
    /// Returns the `spine@toc` reference (EPUB 2 NCX) along with the spine entries.
    pub(super) fn parse_spine(
        &self,
        reader: &mut XmlReader,
        spine: &BytesStart,
    ) -> ParserResult<(Option<String>, Vec<SpineEntry>)> {
        let mut entries = Vec::new();
        let ncx_id = spine.get_attribute(consts::TOC)?;

        while let Some(el) = Self::next_child(reader, bytes::SPINE, bytes::ITEMREF)? {
            // Required fields
            let idref = self.require_attribute(
                el.get_attribute(consts::IDREF)?,
                "spine > itemref[*idref]",
            )?;

            // Optional fields
            let id = el.get_attribute(consts::ID)?;
            let linear = el
                .get_attribute(consts::LINEAR)?
                .is_none_or(|linear| linear != "no");

            entries.push(SpineEntry { idref, id, linear });
        }
        Ok((ncx_id, entries))
    }
}
