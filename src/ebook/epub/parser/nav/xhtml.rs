use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::parser::EpubParserValidator;
use crate::ebook::epub::parser::nav::NavParser;
use crate::ebook::errors::EbookResult;
use crate::ebook::nav::{NavKind, Navigation};
use crate::parser::xml::XmlElement;
use log::warn;
use quick_xml::events::{BytesStart, Event};

impl NavParser<'_> {
    pub(super) fn parse_xhtml(mut self) -> EbookResult<Navigation> {
        while let Some(event) = self.reader.next() {
            match event? {
                Event::Start(el) => match el.local_name().as_ref() {
                    // Root Entry
                    bytes::NAV => self.push_nav_root(&el)?,
                    // Nested Entry
                    bytes::LIST_ITEM if !self.stack.is_empty() => self.push_nav_child(),
                    bytes::ANCHOR => self.handle_nav_anchor(&el)?,
                    bytes::SPAN => self.handle_nav_heading(&el)?,
                    name if bytes::HEADINGS.contains(&name) => self.handle_nav_title(&el)?,
                    _ => {}
                },
                Event::End(el) => match el.local_name().as_ref() {
                    bytes::NAV => self.handle_pop(),
                    // The root is only popped by its `nav` end tag
                    bytes::LIST_ITEM if self.stack.len() > 1 => self.handle_pop(),
                    _ => {}
                },
                _ => {}
            }
        }

        Ok(self.navigation)
    }

    fn push_nav_root(&mut self, el: &BytesStart<'_>) -> EbookResult<()> {
        if !self.stack.is_empty() {
            // Nested `nav` elements are not trees of their own
            return Ok(self.reader.skip_element(el)?);
        }

        // Although rare, `epub:type` allows several properties
        // separated by whitespace. The first is the most relevant.
        let epub_type = el.get_attribute(consts::EPUB_TYPE)?.unwrap_or_default();
        let Some(kind) = epub_type.split_ascii_whitespace().next() else {
            warn!("Skipping `nav` without `epub:type` in `{}`", self.reader.file());
            return Ok(self.reader.skip_element(el)?);
        };

        self.push_root(&NavKind::from(kind));
        Ok(())
    }

    fn push_nav_child(&mut self) {
        self.stack.push(Default::default());
    }

    /// Sets the tree label from the heading preceding its list.
    fn handle_nav_title(&mut self, el: &BytesStart<'_>) -> EbookResult<()> {
        let is_unlabeled_root = matches!(self.stack.as_slice(), [root] if root.label.is_empty());

        if is_unlabeled_root {
            let title = self.reader.element_text(el)?;
            if let Some(root) = self.stack.last_mut() {
                root.label = title;
            }
        }
        Ok(())
    }

    /// `<li><span>Heading</span><ol>...</ol></li>` groups entries without a target.
    fn handle_nav_heading(&mut self, el: &BytesStart<'_>) -> EbookResult<()> {
        let is_unlabeled = self.stack.len() > 1
            && self
                .stack
                .last()
                .is_some_and(|item| item.label.is_empty() && item.href.is_none());

        if is_unlabeled {
            let label = self.reader.element_text(el)?;
            if let Some(item) = self.stack.last_mut() {
                item.label = label;
            }
        }
        Ok(())
    }

    fn handle_nav_anchor(&mut self, el: &BytesStart<'_>) -> EbookResult<()> {
        if self.stack.len() < 2 || self.stack.last().is_some_and(|item| item.href.is_some()) {
            return Ok(());
        }

        let href = self
            .resolver
            .require_attribute(el.get_attribute(consts::HREF)?, "a[*href]")?;
        let epub_type = el.get_attribute(consts::EPUB_TYPE)?;
        let label = self.reader.element_text(el)?;
        self.set_target(href)?;

        if let Some(item) = self.stack.last_mut() {
            item.label = label;
            item.epub_type = epub_type;
        }
        Ok(())
    }
}
