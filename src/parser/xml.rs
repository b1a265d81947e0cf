use crate::ebook::errors::ParseError;
use crate::parser::ParserResult;
use crate::util::str::StringExt;
use quick_xml::Reader;
use quick_xml::escape;
use quick_xml::events::{BytesRef, BytesStart, BytesText, Event};
use std::borrow::Cow;

/// Pull-based XML reader over an in-memory container file.
///
/// Empty elements are expanded into `Start` + `End` pairs,
/// so every [`Event::Start`] is guaranteed a matching [`Event::End`].
pub(crate) struct XmlReader<'a> {
    file: &'a str,
    reader: Reader<&'a [u8]>,
}

impl<'a> XmlReader<'a> {
    /// `file` is the container path, used for more descriptive errors.
    pub(crate) fn new(file: &'a str, data: &'a [u8]) -> Self {
        let mut reader = Reader::from_reader(data);
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        // Content documents may be served as `text/html`
        config.check_end_names = false;

        Self { file, reader }
    }

    pub(crate) fn file(&self) -> &'a str {
        self.file
    }

    /// Iterator-like method to read the next [`Event`].
    pub(crate) fn next(&mut self) -> Option<ParserResult<Event<'a>>> {
        match self.reader.read_event() {
            Ok(Event::Eof) => None,
            result => Some(result.map_err(|source| ParseError::Malformed {
                source,
                file: self.file.to_owned(),
            })),
        }
    }

    /// Retrieve consolidated text for a specified element up to its end tag.
    ///
    /// Whitespace is collapsed and the result is trimmed.
    pub(crate) fn element_text(&mut self, start: &BytesStart) -> ParserResult<String> {
        let mut value = String::new();
        self.collect_text(start, &mut value)?;
        value.trim_in_place();
        Ok(value)
    }

    /// Consumes events until the end of `start`, discarding them.
    pub(crate) fn skip_element(&mut self, start: &BytesStart) -> ParserResult<()> {
        self.collect_text(start, &mut String::new())
    }

    fn collect_text(&mut self, start: &BytesStart, value: &mut String) -> ParserResult<()> {
        let mut depth = 1usize;

        while let Some(event) = self.next() {
            match event? {
                Event::Start(_) => depth += 1,
                Event::End(el) if depth == 1 && el.name() == start.name() => break,
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Text(text) => push_text(value, &text),
                Event::CData(cdata) => {
                    value.push_collapsed(&String::from_utf8_lossy(cdata.as_ref()))
                }
                Event::GeneralRef(reference) => push_reference(value, &reference),
                _ => {}
            }
        }
        Ok(())
    }
}

pub(crate) trait XmlElement {
    fn is_local_name(&self, local_name: impl AsRef<[u8]>) -> bool;

    fn is_prefix(&self, prefix: impl AsRef<[u8]>) -> bool;

    /// Returns the unescaped value of the attribute by its qualified `key`.
    fn get_attribute(&self, key: impl AsRef<[u8]>) -> ParserResult<Option<String>>;

    /// Returns `(local name, unescaped value)` of every attribute with the given `prefix`.
    fn prefixed_attributes(&self, prefix: &str) -> ParserResult<Vec<(String, String)>>;
}

impl XmlElement for BytesStart<'_> {
    fn is_local_name(&self, target_local_name: impl AsRef<[u8]>) -> bool {
        self.local_name().as_ref() == target_local_name.as_ref()
    }

    fn is_prefix(&self, target_prefix: impl AsRef<[u8]>) -> bool {
        self.name()
            .prefix()
            .is_some_and(|p| p.as_ref() == target_prefix.as_ref())
    }

    fn get_attribute(&self, key: impl AsRef<[u8]>) -> ParserResult<Option<String>> {
        let Some(attribute) = self.try_get_attribute(key)? else {
            return Ok(None);
        };
        let raw = String::from_utf8(attribute.value.into_owned())?;

        Ok(Some(unescape(raw)))
    }

    fn prefixed_attributes(&self, prefix: &str) -> ParserResult<Vec<(String, String)>> {
        let mut attributes = Vec::new();

        for attribute in self.attributes() {
            let attribute = attribute?;
            if attribute
                .key
                .prefix()
                .is_none_or(|p| p.as_ref() != prefix.as_bytes())
            {
                continue;
            }
            let name = String::from_utf8(attribute.key.local_name().as_ref().to_vec())?;
            let value = String::from_utf8(attribute.value.into_owned())?;
            attributes.push((name, unescape(value)));
        }
        Ok(attributes)
    }
}

/// Unescapes XML entities, leaving the value untouched if it contains
/// references unknown to XML (e.g., HTML-only entities).
pub(crate) fn unescape(raw: String) -> String {
    let unescaped = match escape::unescape(&raw) {
        Ok(Cow::Owned(unescaped)) => Some(unescaped),
        _ => None,
    };
    unescaped.unwrap_or(raw)
}

/// Appends collapsed text content from a [`BytesText`] event.
pub(crate) fn push_text(value: &mut String, text: &BytesText) {
    value.push_collapsed(&String::from_utf8_lossy(text.as_ref()));
}

/// Appends the character an entity or character reference stands for.
///
/// Unknown named entities are dropped.
pub(crate) fn push_reference(value: &mut String, reference: &BytesRef) {
    let name = String::from_utf8_lossy(reference.as_ref());

    if let Some(c) = resolve_reference(&name) {
        if c.is_whitespace() && c != '\u{A0}' {
            value.push_collapsed(" ");
        } else {
            value.push(c);
        }
    }
}

fn resolve_reference(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => numeric.parse().ok(),
        };
        return code.and_then(char::from_u32);
    }

    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        // Common XHTML entities found within content documents
        "nbsp" => '\u{A0}',
        "shy" => '\u{AD}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "hellip" => '\u{2026}',
        "copy" => '\u{A9}',
        _ => return None,
    })
}
