use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::parser::EpubParserValidator;
use crate::ebook::epub::parser::nav::NavParser;
use crate::ebook::errors::EbookResult;
use crate::ebook::nav::{NavItem, NavKind, Navigation};
use crate::parser::xml::XmlElement;
use quick_xml::events::{BytesStart, Event};

const NAV_LIST: &[u8] = b"navList";

impl NavParser<'_> {
    pub(super) fn parse_ncx(mut self) -> EbookResult<Navigation> {
        let mut doc_title = String::new();

        while let Some(event) = self.reader.next() {
            match event? {
                Event::Start(el) => match el.local_name().as_ref() {
                    bytes::DOC_TITLE => doc_title = self.reader.element_text(&el)?,
                    // Root Entry
                    bytes::NAV_MAP => self.push_root(&NavKind::Toc),
                    bytes::PAGE_LIST => self.push_root(&NavKind::PageList),
                    // Lists of figures and tables are not supported
                    NAV_LIST => self.reader.skip_element(&el)?,
                    // Nested Entry
                    bytes::NAV_POINT | bytes::PAGE_TARGET if !self.stack.is_empty() => {
                        self.push_ncx_child(&el)?;
                    }
                    bytes::NAV_LABEL => self.handle_ncx_label(&el)?,
                    bytes::CONTENT => self.handle_ncx_src(&el)?,
                    _ => {}
                },
                Event::End(el) => match el.local_name().as_ref() {
                    bytes::NAV_MAP => {
                        // Apply the ncx `docTitle` to the main table of contents
                        self.apply_title(&doc_title);
                        self.handle_pop();
                    }
                    bytes::PAGE_LIST | bytes::NAV_POINT | bytes::PAGE_TARGET => {
                        self.handle_pop();
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        Ok(self.navigation)
    }

    fn apply_title(&mut self, doc_title: &str) {
        match self.stack.as_mut_slice() {
            [root] if root.label.is_empty() => root.label = doc_title.to_owned(),
            _ => {}
        }
    }

    fn push_ncx_child(&mut self, el: &BytesStart<'_>) -> EbookResult<()> {
        let mut child = NavItem::default();

        // PageTarget elements require a `type` attribute.
        // - Kinds: "front" | "normal" | "special"
        if el.is_local_name(bytes::PAGE_TARGET) {
            let kind = el.get_attribute(consts::TYPE)?;
            self.resolver
                .require_attribute(kind.as_deref(), "pageTarget[*type]")?;
            child.epub_type = kind;
        }

        self.stack.push(child);
        Ok(())
    }

    fn handle_ncx_label(&mut self, el: &BytesStart<'_>) -> EbookResult<()> {
        if !self.stack.is_empty() {
            // Extract text content
            let label = self.reader.element_text(el)?;
            if let Some(item) = self.stack.last_mut() {
                item.label = label;
            }
        }
        Ok(())
    }

    fn handle_ncx_src(&mut self, el: &BytesStart<'_>) -> EbookResult<()> {
        if self.stack.len() > 1 {
            // NCX documents require content elements to have the src attribute
            let href = self
                .resolver
                .require_attribute(el.get_attribute(consts::SRC)?, "content[*src]")?;
            self.set_target(href)?;
        }
        Ok(())
    }
}
