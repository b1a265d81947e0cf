//! Visible-text extraction for content documents.

use crate::parser::ParserResult;
use crate::parser::xml::{self, XmlElement, XmlReader};
use crate::util::str::StringExt;
use quick_xml::events::Event;
use std::collections::HashMap;

/// Elements whose content is never displayed.
const HIDDEN: &[&[u8]] = &[b"head", b"script", b"style", b"template", b"noscript"];

/// Elements that start on a new line when displayed.
const BLOCKS: &[&[u8]] = &[
    b"address", b"article", b"aside", b"blockquote", b"br", b"dd", b"div", b"dl", b"dt",
    b"figcaption", b"figure", b"footer", b"h1", b"h2", b"h3", b"h4", b"h5", b"h6", b"header",
    b"hr", b"li", b"nav", b"ol", b"p", b"pre", b"section", b"table", b"td", b"th", b"tr", b"ul",
];

/// Elements that never have content; HTML leaves them unclosed (e.g., `<meta charset="utf-8">`).
const VOID: &[&[u8]] = &[
    b"area", b"base", b"br", b"col", b"embed", b"hr", b"img", b"input", b"link", b"meta",
    b"param", b"source", b"track", b"wbr",
];

/// The visible text of a content document, with the character offset of
/// every element `id` ("anchor").
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TextContent {
    pub(crate) text: String,
    /// Number of Unicode scalar values in `text`.
    pub(crate) len: usize,
    pub(crate) anchors: HashMap<String, usize>,
}

impl TextContent {
    pub(crate) fn plain(text: String) -> Self {
        Self {
            len: text.chars().count(),
            text,
            anchors: HashMap::new(),
        }
    }

    /// Extracts visible text from (X)HTML markup.
    ///
    /// Whitespace is collapsed, each block boundary counts as a single line break,
    /// and the result is trimmed.
    pub(crate) fn from_markup(file: &str, data: &[u8]) -> ParserResult<Self> {
        let mut reader = XmlReader::new(file, data);
        let mut text = String::new();
        let mut anchors = HashMap::new();
        // Pending ids are recorded once the next visible character is known,
        // so an anchor never points at collapsed whitespace.
        let mut pending = Vec::new();

        // Depth within a hidden element; `0` when content is visible
        let mut hidden = 0usize;

        while let Some(event) = reader.next() {
            let event = event?;
            if hidden > 0 {
                match event {
                    Event::Start(el) if !VOID.contains(&el.local_name().as_ref()) => hidden += 1,
                    Event::End(el) if !VOID.contains(&el.local_name().as_ref()) => hidden -= 1,
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(el) => {
                    let name = el.local_name();
                    if HIDDEN.contains(&name.as_ref()) {
                        hidden = 1;
                        continue;
                    }
                    if BLOCKS.contains(&name.as_ref()) {
                        break_line(&mut text);
                    }
                    if let Some(id) = el.get_attribute("id")? {
                        pending.push(id);
                    }
                }
                Event::End(el) => {
                    let name = el.local_name();
                    if BLOCKS.contains(&name.as_ref()) && !VOID.contains(&name.as_ref()) {
                        break_line(&mut text);
                    }
                }
                Event::Text(content) => {
                    let before = text.len();
                    xml::push_text(&mut text, &content);
                    settle(&mut anchors, &mut pending, &text, before);
                }
                Event::CData(content) => {
                    let before = text.len();
                    text.push_collapsed(&String::from_utf8_lossy(content.as_ref()));
                    settle(&mut anchors, &mut pending, &text, before);
                }
                Event::GeneralRef(reference) => {
                    let before = text.len();
                    xml::push_reference(&mut text, &reference);
                    settle(&mut anchors, &mut pending, &text, before);
                }
                _ => {}
            }
        }

        text.truncate(text.trim_end().len());
        let len = text.chars().count();

        // Anchors after the last visible character point at the end.
        for id in pending {
            anchors.entry(id).or_insert(len);
        }
        for offset in anchors.values_mut() {
            *offset = (*offset).min(len);
        }

        Ok(Self { text, len, anchors })
    }

    /// Returns the slice of text covering the character `range`.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &str {
        let byte = |index: usize| {
            self.text
                .char_indices()
                .nth(index)
                .map_or(self.text.len(), |(byte, _)| byte)
        };
        let end = end.min(self.len);
        let start = start.min(end);

        &self.text[byte(start)..byte(end)]
    }
}

fn break_line(text: &mut String) {
    if !text.is_empty() {
        // Replace a trailing collapsed space with the line break
        if text.ends_with(' ') {
            text.pop();
        }
        if !text.ends_with('\n') {
            text.push('\n');
        }
    }
}

/// Assigns pending anchors to the first visible character appended after `before`.
fn settle(
    anchors: &mut HashMap<String, usize>,
    pending: &mut Vec<String>,
    text: &str,
    before: usize,
) {
    if pending.is_empty() {
        return;
    }
    let appended = &text[before..];
    let Some(skip) = appended.find(|c: char| !c.is_whitespace()) else {
        return;
    };
    let offset = text[..before + skip].chars().count();

    for id in pending.drain(..) {
        anchors.entry(id).or_insert(offset);
    }
}
