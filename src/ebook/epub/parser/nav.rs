mod ncx;
mod xhtml;

use crate::ebook::content::{ContentStore, Resolved};
use crate::ebook::epub::parser::EpubParserValidator;
use crate::ebook::errors::{EbookResult, ResourceError};
use crate::ebook::location::Location;
use crate::ebook::nav::{NavItem, NavKind, Navigation};
use crate::parser::xml::XmlReader;
use crate::util::uri;
use log::warn;

/// The format of a navigation source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NavSource {
    /// EPUB 3 navigation document (`.xhtml`)
    Xhtml,
    /// EPUB 2 navigation center extended (`.ncx`)
    Ncx,
}

/// Parses one navigation source into its typed trees.
///
/// `file` is the container path of the source, used to resolve relative hrefs.
pub(crate) fn parse_nav(
    source: NavSource,
    content: &ContentStore,
    file: &str,
    data: &[u8],
    strict: bool,
) -> EbookResult<Navigation> {
    let parser = NavParser {
        reader: XmlReader::new(file, data),
        resolver: TargetResolver::new(content, file, strict),
        stack: Vec::new(),
        navigation: Navigation::default(),
    };

    match source {
        NavSource::Xhtml => parser.parse_xhtml(),
        NavSource::Ncx => parser.parse_ncx(),
    }
}

/// Turns hrefs found within a navigation source into reading-order [`Location`] instances.
pub(crate) struct TargetResolver<'a> {
    content: &'a ContentStore,
    /// Container path of the file hrefs are found in
    file: &'a str,
    parent_dir: &'a str,
    strict: bool,
}

impl<'a> TargetResolver<'a> {
    pub(crate) fn new(content: &'a ContentStore, file: &'a str, strict: bool) -> Self {
        Self {
            content,
            file,
            parent_dir: uri::parent(file),
            strict,
        }
    }

    /// Resolves `href` relative to the source file.
    ///
    /// Returns [`None`] for hrefs with a scheme (e.g., `https://`),
    /// as they never point into the reading order.
    pub(crate) fn resolve(&self, href: &str) -> EbookResult<Option<Location>> {
        if href.is_empty() || uri::has_scheme(href) {
            return Ok(None);
        }

        let (path, fragment) = uri::split_fragment(href);
        let path = if path.is_empty() {
            // `#fragment` references the source file itself
            self.file.to_owned()
        } else {
            uri::to_container_path(self.parent_dir, path)
        };

        match self.content.resolve(&path, fragment) {
            Resolved::Exact(location) => Ok(Some(location)),
            Resolved::UnknownFragment(start) => {
                self.tolerate(self.dangling(href))?;
                warn!("Unknown fragment in `{href}`; targeting the start of `{path}`");
                Ok(Some(start))
            }
            Resolved::OutsideReadingOrder => {
                self.tolerate(self.dangling(href))?;
                warn!("`{href}` is not part of the reading order; leaving it untargeted");
                Ok(None)
            }
            Resolved::Missing => Err(self.dangling(href).into()),
        }
    }

    fn dangling(&self, href: &str) -> ResourceError {
        ResourceError::DanglingTarget {
            file: self.file.to_owned(),
            href: href.to_owned(),
        }
    }
}

impl EpubParserValidator for TargetResolver<'_> {
    fn is_strict(&self) -> bool {
        self.strict
    }
}

struct NavParser<'a> {
    reader: XmlReader<'a>,
    resolver: TargetResolver<'a>,
    /// Stack to keep track of the latest nav entry
    stack: Vec<NavItem>,
    /// Container for all completed trees
    navigation: Navigation,
}

impl NavParser<'_> {
    /// Starts a tree; the kind is kept as the `epub_type` of the root.
    fn push_root(&mut self, kind: &NavKind) {
        self.stack.push(NavItem {
            epub_type: Some(kind.to_string()),
            ..NavItem::default()
        });
    }

    fn handle_pop(&mut self) {
        let Some(item) = self.stack.pop() else {
            return;
        };

        // The entry has a parent
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(item);
        } else {
            // The entry does not have a parent; the root
            let kind = NavKind::from(item.epub_type.as_deref().unwrap_or_default());
            self.navigation.push(kind, item);
        }
    }

    /// Assigns `href` and its resolved target to the latest entry.
    fn set_target(&mut self, href: String) -> EbookResult<()> {
        let target = self.resolver.resolve(&href)?;

        if let Some(item) = self.stack.last_mut() {
            item.target = target;
            item.href = (!href.is_empty()).then_some(href);
        }
        Ok(())
    }
}
