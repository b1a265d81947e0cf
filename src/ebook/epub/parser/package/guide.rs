use crate::ebook::content::ContentStore;
use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::parser::nav::TargetResolver;
use crate::ebook::epub::parser::{EpubParser, EpubParserValidator};
use crate::ebook::errors::EbookResult;
use crate::ebook::nav::{NavItem, NavKind};
use crate::parser::ParserResult;
use crate::parser::xml::{XmlElement, XmlReader};

/// The EPUB 2 `guide`; superseded by EPUB 3 landmarks.
#[derive(Default)]
pub(crate) struct Guide {
    references: Vec<GuideReference>,
}

struct GuideReference {
    /// Raw href, relative to the package file
    href: String,
    title: Option<String>,
    kind: String,
}

impl Guide {
    pub(crate) fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Converts the guide into a landmarks tree.
    ///
    /// Targets are resolved once the content is loaded,
    /// as the guide precedes it within the package.
    pub(crate) fn resolve(
        &self,
        content: &ContentStore,
        package_file: &str,
        strict: bool,
    ) -> EbookResult<NavItem> {
        let resolver = TargetResolver::new(content, package_file, strict);
        let mut root = NavItem {
            epub_type: Some(NavKind::LANDMARKS.to_owned()),
            ..NavItem::default()
        };

        for reference in &self.references {
            root.children.push(NavItem {
                label: reference.title.clone().unwrap_or_default(),
                href: Some(reference.href.clone()),
                target: resolver.resolve(&reference.href)?,
                epub_type: Some(reference.kind.clone()),
                children: Vec::new(),
            });
        }
        Ok(root)
    }
}

impl EpubParser<'_> {
    pub(super) fn parse_guide(&self, reader: &mut XmlReader) -> ParserResult<Guide> {
        let mut references = Vec::new();

        while let Some(el) = Self::next_child(reader, bytes::GUIDE, bytes::REFERENCE)? {
            // Required fields
            let href = self.require_attribute(
                el.get_attribute(consts::HREF)?,
                "guide > reference[*href]",
            )?;
            let kind = self.require_attribute(
                el.get_attribute(consts::TYPE)?,
                "guide > reference[*type]",
            )?;

            // Optional fields
            let title = el.get_attribute(consts::TITLE)?;

            if href.is_empty() {
                continue;
            }
            references.push(GuideReference { href, title, kind });
        }

        Ok(Guide { references })
    }
}
