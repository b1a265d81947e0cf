//! Navigation trees: table of contents, page list, landmarks and custom groups.
//!
//! Each tree is an immutable, ordered hierarchy of [`NavItem`] instances.
//! Traversal is left to the caller:
//! ```
//! # use folio::ebook::nav::NavItem;
//! # use folio::Epub;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! fn walk(item: &NavItem, depth: usize) {
//!     for child in item.children() {
//!         println!("{}{}", "  ".repeat(depth), child.label());
//!         walk(child, depth + 1);
//!     }
//! }
//!
//! let epub = Epub::open("tests/ebooks/example_epub")?;
//! walk(epub.navigation().contents().unwrap(), 0);
//! # Ok(())
//! # }
//! ```

use crate::ebook::content::ContentStore;
use crate::ebook::epub::parser::nav::{NavSource, parse_nav};
use crate::ebook::errors::{EbookResult, NotFoundError};
use crate::ebook::location::Location;
use std::fmt::{Display, Formatter};

/// The kind of a navigation tree.
///
/// Derived from the `epub:type` of an EPUB 3 `nav` element,
/// or from the NCX element (`navMap`, `pageList`) of an EPUB 2 navigation source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavKind {
    /// The main table of contents (`toc`).
    Toc,
    /// Static page break markers (`page-list`).
    PageList,
    /// Structural points of interest, such as the cover or start of the body (`landmarks`).
    Landmarks,
    /// Any other navigation group, keyed by its `epub:type` (e.g., `lot`, `loi`).
    Custom(String),
}

impl NavKind {
    pub(crate) const TOC: &'static str = "toc";
    pub(crate) const PAGE_LIST: &'static str = "page-list";
    pub(crate) const LANDMARKS: &'static str = "landmarks";

    /// The string form of the kind, as it appears in `epub:type`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Toc => Self::TOC,
            Self::PageList => Self::PAGE_LIST,
            Self::Landmarks => Self::LANDMARKS,
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for NavKind {
    fn from(value: &str) -> Self {
        match value {
            Self::TOC => Self::Toc,
            Self::PAGE_LIST => Self::PageList,
            Self::LANDMARKS => Self::Landmarks,
            custom => Self::Custom(custom.to_owned()),
        }
    }
}

impl Display for NavKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a navigation tree.
///
/// The root of each tree carries the heading of its source
/// (e.g., `<h2>Contents</h2>` or the NCX `docTitle`) as its label and has no target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavItem {
    pub(crate) label: String,
    pub(crate) href: Option<String>,
    pub(crate) target: Option<Location>,
    pub(crate) epub_type: Option<String>,
    pub(crate) children: Vec<NavItem>,
}

impl NavItem {
    /// The display label; may be empty.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The raw href as written in the navigation source (e.g., `c1.xhtml#s2`).
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// The resolved location within the reading order.
    ///
    /// [`None`] for headings without a link, links outside the container,
    /// and the tree root.
    pub fn target(&self) -> Option<&Location> {
        self.target.as_ref()
    }

    /// The semantic type of the entry, such as:
    /// - `epub:type` (e.g., `bodymatter`, `cover`) of an EPUB 3 link.
    /// - `type` of an NCX `pageTarget` (e.g., `normal`, `front`).
    /// - `type` of an EPUB 2 guide `reference` (e.g., `text`, `toc`).
    pub fn epub_type(&self) -> Option<&str> {
        self.epub_type.as_deref()
    }

    /// The ordered child entries; the source order is preserved.
    pub fn children(&self) -> &[NavItem] {
        &self.children
    }
}

/// All navigation trees of a work, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Navigation {
    trees: Vec<(NavKind, NavItem)>,
}

impl Navigation {
    /// Parses an EPUB 3 navigation document into typed trees.
    ///
    /// `nav_path` is the container path of the document (e.g., `OEBPS/nav.xhtml`),
    /// used to resolve relative hrefs against `content`.
    /// Resolution is strict: every link must target a resource in the reading order
    /// and every fragment must name an element.
    ///
    /// # Errors
    /// - [`ParseError`](crate::ebook::errors::ParseError): Malformed markup.
    /// - [`ResourceError::DanglingTarget`](crate::ebook::errors::ResourceError::DanglingTarget):
    ///   A link does not resolve to a reading-order location.
    pub fn build(content: &ContentStore, nav_path: &str, markup: &[u8]) -> EbookResult<Self> {
        parse_nav(NavSource::Xhtml, content, nav_path, markup, true)
    }

    /// Parses an EPUB 2 NCX document into typed trees.
    ///
    /// `navMap` becomes [`NavKind::Toc`] and `pageList` becomes [`NavKind::PageList`].
    ///
    /// # Errors
    /// See [`Self::build`].
    pub fn build_ncx(content: &ContentStore, ncx_path: &str, markup: &[u8]) -> EbookResult<Self> {
        parse_nav(NavSource::Ncx, content, ncx_path, markup, true)
    }

    /// Returns the root of the tree of the given kind.
    ///
    /// If a source contains several trees of the same kind, the first is returned.
    ///
    /// # Errors
    /// [`NotFoundError::Tree`]: No tree of the given kind exists.
    pub fn tree(&self, kind: &NavKind) -> Result<&NavItem, NotFoundError> {
        self.trees
            .iter()
            .find(|(tree_kind, _)| tree_kind == kind)
            .map(|(_, root)| root)
            .ok_or_else(|| NotFoundError::Tree(kind.to_string()))
    }

    /// The table of contents.
    pub fn contents(&self) -> Option<&NavItem> {
        self.tree(&NavKind::Toc).ok()
    }

    /// The page list.
    pub fn page_list(&self) -> Option<&NavItem> {
        self.tree(&NavKind::PageList).ok()
    }

    /// The landmarks, or the EPUB 2 guide if no landmarks exist.
    pub fn landmarks(&self) -> Option<&NavItem> {
        self.tree(&NavKind::Landmarks).ok()
    }

    /// A custom navigation group by its `epub:type` (e.g., `loi`).
    pub fn custom(&self, name: &str) -> Option<&NavItem> {
        self.trees
            .iter()
            .find(|(kind, _)| matches!(kind, NavKind::Custom(custom) if custom == name))
            .map(|(_, root)| root)
    }

    /// The kinds of all available trees, in source order.
    pub fn kinds(&self) -> impl Iterator<Item = &NavKind> + '_ {
        self.trees.iter().map(|(kind, _)| kind)
    }

    /// Returns `true` if there are no trees.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub(crate) fn contains(&self, kind: &NavKind) -> bool {
        self.trees.iter().any(|(tree_kind, _)| tree_kind == kind)
    }

    pub(crate) fn push(&mut self, kind: NavKind, root: NavItem) {
        self.trees.push((kind, root));
    }

    /// Adds every tree of `other` whose kind is not yet present.
    pub(crate) fn fill_from(&mut self, other: Navigation) {
        for (kind, root) in other.trees {
            if !self.contains(&kind) {
                self.trees.push((kind, root));
            }
        }
    }
}
