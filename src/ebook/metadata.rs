//! Queryable metadata statements extracted from the package document.
//!
//! Every `dc:*` element, `meta` element and legacy `opf:*` attribute becomes a
//! [`MetadataStatement`] keyed by `(namespace URI, property)`:
//!
//! | Source                                          | Namespace                                   | Property   |
//! |-------------------------------------------------|---------------------------------------------|------------|
//! | `<dc:title>`                                    | `http://purl.org/dc/elements/1.1/`          | `title`    |
//! | `<meta property="dcterms:modified">`            | `http://purl.org/dc/terms/`                 | `modified` |
//! | `<meta refines="#t1" property="title-type">`    | `http://idpf.org/epub/vocab/package/meta/#` | `title-type` |
//! | `<meta name="cover" content="img"/>` (EPUB 2)   | `http://www.idpf.org/2007/opf`              | `cover`    |
//! | `<dc:creator opf:role="aut">` (EPUB 2)          | `http://idpf.org/epub/vocab/package/meta/#` | `role` (refinement) |

use crate::ebook::epub::consts::ns;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

/// Namespace URI of Dublin Core elements (`dc:*`).
pub const DC_NAMESPACE: &str = ns::DC;
/// Namespace URI of DCMI terms (`dcterms:*`).
pub const DCTERMS_NAMESPACE: &str = ns::DCTERMS;
/// Namespace URI of the default EPUB 3 meta vocabulary (unprefixed `meta@property`).
pub const META_NAMESPACE: &str = ns::META;
/// Namespace URI of EPUB 2 `meta@name` statements.
pub const OPF_NAMESPACE: &str = ns::OPF;
/// Namespace URI of EPUB 3 rendition properties (`rendition:*`).
pub const RENDITION_NAMESPACE: &str = ns::RENDITION;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct StatementData {
    pub(crate) namespace: String,
    pub(crate) property: String,
    pub(crate) value: String,
    pub(crate) id: Option<String>,
    pub(crate) language: Option<String>,
    /// The raw id (without `#`) this statement refines.
    pub(crate) refines: Option<String>,
    /// Index of the refined statement, if it resides within the metadata.
    pub(crate) parent: Option<usize>,
    pub(crate) refinements: Vec<usize>,
}

/// A multimap of metadata statements in declaration order.
#[derive(Clone, Default, PartialEq)]
pub struct MetadataIndex {
    version: String,
    unique_identifier: Option<String>,
    statements: Vec<StatementData>,
    by_id: HashMap<String, usize>,
    by_key: HashMap<(String, String), Vec<usize>>,
}

impl MetadataIndex {
    /// `statements` must have their `parent` and `refinements` linked.
    pub(crate) fn new(
        version: String,
        unique_identifier: Option<String>,
        statements: Vec<StatementData>,
    ) -> Self {
        let mut by_id = HashMap::new();
        let mut by_key: HashMap<(String, String), Vec<usize>> = HashMap::new();

        for (index, statement) in statements.iter().enumerate() {
            if let Some(id) = &statement.id {
                by_id.entry(id.clone()).or_insert(index);
            }
            by_key
                .entry((statement.namespace.clone(), statement.property.clone()))
                .or_default()
                .push(index);
        }

        Self {
            version,
            unique_identifier,
            statements,
            by_id,
            by_key,
        }
    }

    fn statement(&self, index: usize) -> MetadataStatement<'_> {
        MetadataStatement {
            index: self,
            data: &self.statements[index],
        }
    }

    fn matching<'a>(
        &'a self,
        namespace: &str,
        property: &str,
    ) -> impl Iterator<Item = MetadataStatement<'a>> + use<'a> {
        self.by_key
            .get(&(namespace.to_owned(), property.to_owned()))
            .into_iter()
            .flatten()
            .map(|&index| self.statement(index))
    }

    /// Returns all statements with the given namespace and property that
    /// refine nothing, in declaration order.
    ///
    /// An empty [`Vec`] is returned when none match.
    ///
    /// # Examples
    /// ```
    /// # use folio::ebook::metadata::DC_NAMESPACE;
    /// # use folio::Epub;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let epub = Epub::open("tests/ebooks/example_epub")?;
    /// let titles = epub.metadata().find(DC_NAMESPACE, "title");
    ///
    /// assert_eq!("Example EPUB", titles[0].value());
    /// assert_eq!("A Subtitle", titles[1].value());
    /// # Ok(())
    /// # }
    /// ```
    pub fn find(&self, namespace: &str, property: &str) -> Vec<MetadataStatement<'_>> {
        self.matching(namespace, property)
            .filter(|statement| !statement.is_refinement())
            .collect()
    }

    /// Returns all refinements (statements with a `refines` target) with the
    /// given namespace and property, in declaration order.
    ///
    /// An empty [`Vec`] is returned when none match.
    pub fn find_refined(&self, namespace: &str, property: &str) -> Vec<MetadataStatement<'_>> {
        self.matching(namespace, property)
            .filter(MetadataStatement::is_refinement)
            .collect()
    }

    /// Returns the statement with the given `id`.
    pub fn by_id(&self, id: &str) -> Option<MetadataStatement<'_>> {
        self.by_id.get(id).map(|&index| self.statement(index))
    }

    /// Iterates over every statement, refinements included, in declaration order.
    pub fn statements(&self) -> impl Iterator<Item = MetadataStatement<'_>> + '_ {
        (0..self.statements.len()).map(|index| self.statement(index))
    }

    /// The number of statements, refinements included.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns `true` if there are no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// The raw `package@version` value (e.g., `3.0`).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The main title.
    ///
    /// The first `dc:title` refined with `title-type` `main` is preferred,
    /// otherwise the first `dc:title` is returned.
    pub fn title(&self) -> Option<MetadataStatement<'_>> {
        let titles = self.find(ns::DC, "title");

        titles
            .iter()
            .find(|title| {
                title
                    .refinement("title-type")
                    .is_some_and(|kind| kind.value() == "main")
            })
            .or_else(|| titles.first())
            .copied()
    }

    /// The primary language (the first `dc:language`).
    pub fn language(&self) -> Option<MetadataStatement<'_>> {
        self.find(ns::DC, "language").into_iter().next()
    }

    /// The `dc:identifier` referenced by `package@unique-identifier`.
    pub fn unique_identifier(&self) -> Option<MetadataStatement<'_>> {
        self.unique_identifier
            .as_deref()
            .and_then(|id| self.by_id(id))
    }

    /// The last modification date (`dcterms:modified`).
    pub fn modified(&self) -> Option<MetadataStatement<'_>> {
        self.find(ns::DCTERMS, "modified").into_iter().next()
    }
}

impl Debug for MetadataIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataIndex")
            .field("version", &self.version)
            .field("unique_identifier", &self.unique_identifier)
            .field("statements", &self.statements)
            .finish_non_exhaustive()
    }
}

/// A single metadata statement: `(namespace, property, value)`.
#[derive(Copy, Clone)]
pub struct MetadataStatement<'ebook> {
    index: &'ebook MetadataIndex,
    data: &'ebook StatementData,
}

impl<'ebook> MetadataStatement<'ebook> {
    /// The resolved namespace URI (e.g., `http://purl.org/dc/elements/1.1/`).
    pub fn namespace(&self) -> &'ebook str {
        &self.data.namespace
    }

    /// The local property name (e.g., `title`, `modified`).
    pub fn property(&self) -> &'ebook str {
        &self.data.property
    }

    /// The trimmed value.
    pub fn value(&self) -> &'ebook str {
        &self.data.value
    }

    /// The `id` of the statement.
    pub fn id(&self) -> Option<&'ebook str> {
        self.data.id.as_deref()
    }

    /// The `xml:lang` of the statement, inherited from the `package` element if absent.
    pub fn language(&self) -> Option<&'ebook str> {
        self.data.language.as_deref()
    }

    /// The id of the element this statement refines (without `#`).
    ///
    /// The target may be another statement or a manifest/spine entry.
    pub fn refines(&self) -> Option<&'ebook str> {
        self.data.refines.as_deref()
    }

    /// Returns `true` if this statement refines another element.
    pub fn is_refinement(&self) -> bool {
        self.data.refines.is_some() || self.data.parent.is_some()
    }

    /// The refined statement, if the target resides within the metadata.
    pub fn refined(&self) -> Option<MetadataStatement<'ebook>> {
        self.data.parent.map(|index| self.index.statement(index))
    }

    /// The statements refining this statement, in declaration order.
    pub fn refinements(&self) -> impl Iterator<Item = MetadataStatement<'ebook>> + use<'ebook> {
        let index = self.index;
        self.data
            .refinements
            .iter()
            .map(move |&refinement| index.statement(refinement))
    }

    /// The first refinement with the given property (e.g., `file-as`, `role`).
    pub fn refinement(&self, property: &str) -> Option<MetadataStatement<'ebook>> {
        self.refinements()
            .find(|refinement| refinement.property() == property)
    }
}

impl PartialEq for MetadataStatement<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Debug for MetadataStatement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataStatement")
            .field("namespace", &self.data.namespace)
            .field("property", &self.data.property)
            .field("value", &self.data.value)
            .field("id", &self.data.id)
            .field("refines", &self.data.refines)
            .finish_non_exhaustive()
    }
}
