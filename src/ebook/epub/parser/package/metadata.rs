use crate::ebook::epub::consts::{self, bytes, ns};
use crate::ebook::epub::parser::package::PackageAttributes;
use crate::ebook::epub::parser::{EpubParser, EpubParserValidator};
use crate::ebook::errors::ParseError;
use crate::ebook::metadata::{MetadataIndex, StatementData};
use crate::parser::ParserResult;
use crate::parser::xml::{XmlElement, XmlReader};
use log::warn;
use quick_xml::events::{BytesStart, Event};
use std::collections::{HashMap, HashSet};

/// Statements in declaration order, prior to refinement resolution.
#[derive(Default)]
pub(super) struct MetadataBuilder {
    statements: Vec<StatementData>,
}

impl MetadataBuilder {
    fn push(&mut self, statement: StatementData) -> usize {
        self.statements.push(statement);
        self.statements.len() - 1
    }
}

enum MetaKind {
    /// `<dc:*>`
    DublinCore,
    /// `<meta property="...">`
    Meta,
    /// `<meta name="..." content="..."/>`
    LegacyMeta,
}

impl EpubParser<'_> {
    pub(super) fn parse_metadata(
        &self,
        reader: &mut XmlReader,
        package: &PackageAttributes,
    ) -> ParserResult<MetadataBuilder> {
        let mut builder = MetadataBuilder::default();

        while let Some(event) = reader.next() {
            let el = match event? {
                Event::Start(el) => el,
                Event::End(el) if el.local_name().as_ref() == bytes::METADATA => break,
                _ => continue,
            };

            match Self::extract_kind(&el)? {
                Some(MetaKind::DublinCore) => {
                    self.handle_dublin_core(reader, package, &el, &mut builder)?
                }
                Some(MetaKind::Meta) => self.handle_meta(reader, package, &el, &mut builder)?,
                Some(MetaKind::LegacyMeta) => {
                    self.handle_legacy_meta(reader, package, &el, &mut builder)?
                }
                // `<link>` elements are not statements
                None if el.is_local_name(consts::LINK) => reader.skip_element(&el)?,
                // Wrappers (e.g., EPUB 2 `<dc-metadata>`) are descended into
                None => {}
            }
        }

        Ok(builder)
    }

    fn extract_kind(el: &BytesStart) -> ParserResult<Option<MetaKind>> {
        Ok(if el.is_prefix(consts::DC_PREFIX) {
            Some(MetaKind::DublinCore)
        } else if el.is_local_name(consts::META) {
            // EPUB 2 `<meta>` does NOT use the `property` attribute
            if el.get_attribute(consts::PROPERTY)?.is_none()
                && el.get_attribute(consts::NAME)?.is_some()
            {
                Some(MetaKind::LegacyMeta)
            } else {
                Some(MetaKind::Meta)
            }
        } else {
            None
        })
    }

    // Handle `<dc:*>` elements
    fn handle_dublin_core(
        &self,
        reader: &mut XmlReader,
        package: &PackageAttributes,
        el: &BytesStart,
        builder: &mut MetadataBuilder,
    ) -> ParserResult<()> {
        let property = String::from_utf8(el.local_name().as_ref().to_vec())?;
        let id = el.get_attribute(consts::ID)?;
        let language = el.get_attribute(consts::LANG)?.or_else(|| package.language.clone());
        // Legacy attributes (e.g., `opf:role`) become refinements of this statement
        let legacy = el.prefixed_attributes(consts::OPF_PREFIX)?;
        let value = reader.element_text(el)?;

        let parent = builder.push(StatementData {
            namespace: ns::DC.to_owned(),
            property,
            value,
            id: id.clone(),
            language: language.clone(),
            ..StatementData::default()
        });

        for (property, value) in legacy {
            builder.push(StatementData {
                namespace: ns::META.to_owned(),
                property,
                value,
                language: language.clone(),
                refines: id.clone(),
                parent: Some(parent),
                ..StatementData::default()
            });
        }
        Ok(())
    }

    // Handle EPUB 3 `<meta property="...">` elements
    fn handle_meta(
        &self,
        reader: &mut XmlReader,
        package: &PackageAttributes,
        el: &BytesStart,
        builder: &mut MetadataBuilder,
    ) -> ParserResult<()> {
        let property = self.require_attribute(
            el.get_attribute(consts::PROPERTY)?,
            "metadata > meta[*property]",
        )?;
        let id = el.get_attribute(consts::ID)?;
        let language = el.get_attribute(consts::LANG)?.or_else(|| package.language.clone());
        let refines = el
            .get_attribute(consts::REFINES)?
            .map(Self::normalize_refines);
        let content = el.get_attribute(consts::CONTENT)?;
        let mut value = reader.element_text(el)?;

        if value.is_empty() {
            // Rare but can happen, attempt to recover if the epub is non-standard:
            // `<meta property="a" content="b" />`
            value = content.unwrap_or_default();
        }
        if property.is_empty() {
            // Only reachable when not strict
            return Ok(());
        }

        let Some((namespace, property)) = self.resolve_property(package, &property)? else {
            return Ok(());
        };
        builder.push(StatementData {
            namespace,
            property,
            value,
            id,
            language,
            refines,
            ..StatementData::default()
        });
        Ok(())
    }

    // Handle EPUB 2 `<meta name="..." content="..."/>` elements
    fn handle_legacy_meta(
        &self,
        reader: &mut XmlReader,
        package: &PackageAttributes,
        el: &BytesStart,
        builder: &mut MetadataBuilder,
    ) -> ParserResult<()> {
        let property = el.get_attribute(consts::NAME)?.unwrap_or_default();
        let value = self.require_attribute(
            el.get_attribute(consts::CONTENT)?,
            "metadata > meta[*content]",
        )?;
        let id = el.get_attribute(consts::ID)?;
        let language = el.get_attribute(consts::LANG)?.or_else(|| package.language.clone());
        reader.skip_element(el)?;

        builder.push(StatementData {
            namespace: ns::OPF.to_owned(),
            property,
            value,
            id,
            language,
            ..StatementData::default()
        });
        Ok(())
    }

    /// Splits `prefix:reference` into its namespace URI and local property.
    ///
    /// Unprefixed properties belong to the default meta vocabulary.
    fn resolve_property(
        &self,
        package: &PackageAttributes,
        property: &str,
    ) -> ParserResult<Option<(String, String)>> {
        let Some((prefix, reference)) = property.split_once(':') else {
            return Ok(Some((ns::META.to_owned(), property.to_owned())));
        };
        let namespace = package.prefixes.get(prefix).map(String::as_str).or_else(|| {
            ns::RESERVED
                .iter()
                .find(|(reserved, _)| *reserved == prefix)
                .map(|(_, uri)| *uri)
        });

        match namespace {
            Some(namespace) => Ok(Some((namespace.to_owned(), reference.to_owned()))),
            None => {
                self.tolerate(ParseError::InvalidPrefix(format!(
                    "undeclared prefix `{prefix}` in `{property}`"
                )))?;
                warn!("Dropping metadata property with undeclared prefix: `{property}`");
                Ok(None)
            }
        }
    }

    fn normalize_refines(mut refines: String) -> String {
        if refines.starts_with('#') {
            refines.remove(0);
        }
        refines
    }

    ////////////////////////////////////////////////////////////////////////////////
    // META REFINEMENTS
    ////////////////////////////////////////////////////////////////////////////////

    /// Links refinements to their parent statements.
    ///
    /// `known_ids` are ids outside the metadata (manifest items, spine entries)
    /// that refinements may legitimately target.
    pub(super) fn finish_metadata(
        &self,
        builder: MetadataBuilder,
        package: PackageAttributes,
        known_ids: &HashSet<&str>,
    ) -> ParserResult<MetadataIndex> {
        let mut statements = builder.statements;
        let mut ids = HashMap::new();

        for (index, statement) in statements.iter().enumerate() {
            if let Some(id) = &statement.id {
                ids.entry(id.clone()).or_insert(index);
            }
        }

        for statement in &mut statements {
            let Some(target) = statement.refines.as_deref() else {
                continue;
            };
            if statement.parent.is_some() {
                continue;
            }
            if let Some(&parent) = ids.get(target) {
                statement.parent = Some(parent);
            } else if !known_ids.contains(target) {
                self.tolerate(ParseError::InvalidRefines(target.to_owned()))?;
            }
        }

        Self::assert_acyclic(&statements)?;

        for index in 0..statements.len() {
            if let Some(parent) = statements[index].parent {
                statements[parent].refinements.push(index);
            }
        }

        Ok(MetadataIndex::new(
            package.version,
            package.unique_id,
            statements,
        ))
    }

    /// Malformed (or malicious) packages may chain refinements into a cycle.
    ///
    /// Each statement refines at most one parent, so every chain is walked
    /// iteratively regardless of its length.
    fn assert_acyclic(statements: &[StatementData]) -> ParserResult<()> {
        const UNSET: u8 = 0;
        const IN_PROGRESS: u8 = 1;
        const DONE: u8 = 2;

        let mut states = vec![UNSET; statements.len()];
        let mut chain = Vec::new();

        for start in 0..statements.len() {
            let mut current = Some(start);

            while let Some(index) = current {
                match states[index] {
                    DONE => break,
                    IN_PROGRESS => {
                        let statement = &statements[index];
                        let id = statement.id.as_deref().or(statement.refines.as_deref());
                        return Err(ParseError::CyclicRefinement(id.unwrap_or_default().to_owned()));
                    }
                    _ => {}
                }
                states[index] = IN_PROGRESS;
                chain.push(index);
                current = statements[index].parent;
            }
            for index in chain.drain(..) {
                states[index] = DONE;
            }
        }
        Ok(())
    }
}
