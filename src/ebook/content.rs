//! Addressable content of an [`Epub`](crate::Epub).
//!
//! The [`ContentStore`] owns every manifest resource as an immutable [`ContentUnit`]
//! and the reading order (spine) from which the
//! [`LocationModel`](crate::ebook::location::LocationModel) is derived.

pub(crate) mod text;

use crate::ebook::content::text::TextContent;
use crate::ebook::errors::NotFoundError;
use crate::ebook::location::{Location, LocationModel};
use crate::paginator::Screen;
use crate::util::{str, uri};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::ops::Range;

/// Media types measured by their visible text.
const TEXT_MEDIA_TYPES: &[&str] = &["application/xhtml+xml", "text/html", "text/plain"];

/// Immutable manifest resource.
///
/// Spine resources with a text media type carry their extracted visible text,
/// which determines their [extent](Self::extent).
/// All other resources are *atomic* and have an extent of `1`.
#[derive(Clone, PartialEq)]
pub struct ContentUnit {
    id: String,
    href: String,
    media_type: String,
    properties: String,
    /// [`None`] if the resource is remote (outside the container).
    data: Option<Vec<u8>>,
    text: Option<TextContent>,
}

impl ContentUnit {
    pub(crate) fn new(
        id: String,
        href: String,
        media_type: String,
        properties: String,
        data: Option<Vec<u8>>,
    ) -> Self {
        Self {
            id,
            href,
            media_type,
            properties,
            data,
            text: None,
        }
    }

    pub(crate) fn set_text(&mut self, text: TextContent) {
        self.text = Some(text);
    }

    /// The unique manifest id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The decoded container path (e.g., `OEBPS/text/c1.xhtml`),
    /// or the original href if the resource is remote.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The lowercase media type (e.g., `application/xhtml+xml`).
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns `true` if the media type is measured by visible text.
    pub fn is_text(&self) -> bool {
        TEXT_MEDIA_TYPES.contains(&self.media_type.as_str())
    }

    /// Returns `true` if the resource resides outside the container
    /// (e.g., `https://...`) and therefore has no bytes.
    pub fn is_remote(&self) -> bool {
        self.data.is_none()
    }

    /// The raw bytes of the resource; empty if [remote](Self::is_remote).
    pub fn data(&self) -> &[u8] {
        self.data.as_deref().unwrap_or_default()
    }

    /// The byte length of [`Self::data`].
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `true` if [`Self::data`] is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The whitespace-separated manifest `properties` (e.g., `nav`, `cover-image`).
    pub fn properties(&self) -> impl Iterator<Item = &str> + '_ {
        str::tokens(&self.properties)
    }

    /// Returns `true` if the manifest `properties` contain the given `property`.
    pub fn has_property(&self, property: &str) -> bool {
        self.properties().any(|token| token == property)
    }

    /// The visible text of a spine text document.
    ///
    /// Whitespace is collapsed and every block boundary is a single line break.
    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().map(|text| text.text.as_str())
    }

    /// The progress length of the resource.
    ///
    /// Text documents within the spine measure the number of characters
    /// of their visible [text](Self::text); all other resources are atomic (`1`).
    pub fn extent(&self) -> usize {
        self.text.as_ref().map_or(1, |text| text.len)
    }

    /// The character offset of the element with the given `id` (a fragment identifier).
    pub fn anchor(&self, id: &str) -> Option<usize> {
        self.text
            .as_ref()
            .and_then(|text| text.anchors.get(id).copied())
    }

    /// The visible text covered by the given character `range`.
    ///
    /// The range is clamped to [`Self::extent`];
    /// atomic resources have no text and always return an empty string.
    pub fn excerpt(&self, range: Range<usize>) -> &str {
        self.text
            .as_ref()
            .map_or("", |text| text.slice(range.start, range.end))
    }
}

impl Debug for ContentUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentUnit")
            .field("id", &self.id)
            .field("href", &self.href)
            .field("media_type", &self.media_type)
            .field("properties", &self.properties)
            .field("len", &self.len())
            .field("extent", &self.extent())
            .finish_non_exhaustive()
    }
}

/// The portion of a single resource covered by a [`Screen`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment<'ebook> {
    unit: &'ebook ContentUnit,
    range: (usize, usize),
}

impl<'ebook> Segment<'ebook> {
    /// The covered resource.
    pub fn unit(&self) -> &'ebook ContentUnit {
        self.unit
    }

    /// The covered character range (`[start, end)`) within [`Self::unit`].
    pub fn range(&self) -> Range<usize> {
        self.range.0..self.range.1
    }

    /// The visible text of the covered range.
    ///
    /// Empty for atomic resources (e.g., images).
    pub fn text(&self) -> &'ebook str {
        self.unit.excerpt(self.range())
    }
}

/// Immutable store of all manifest resources, keyed by manifest id.
///
/// # Invariants
/// - Manifest ids are unique.
/// - The reading order is non-empty and each id resolves via [`Self::get`].
#[derive(Clone, PartialEq)]
pub struct ContentStore {
    /// Manifest order
    units: Vec<ContentUnit>,
    by_id: HashMap<String, usize>,
    by_href: HashMap<String, usize>,
    /// Manifest ids of non-linear spine entries.
    non_linear: Vec<String>,
    locations: LocationModel,
}

impl ContentStore {
    /// `units` must have unique ids and `reading_order` must only
    /// reference those ids; both are validated by the package parser.
    pub(crate) fn new(
        units: Vec<ContentUnit>,
        reading_order: Vec<String>,
        non_linear: Vec<String>,
    ) -> Self {
        let by_id = units
            .iter()
            .enumerate()
            .map(|(index, unit)| (unit.id.clone(), index))
            .collect::<HashMap<_, _>>();
        let by_href = units
            .iter()
            .enumerate()
            .filter(|(_, unit)| !unit.is_remote())
            .map(|(index, unit)| (unit.href.clone(), index))
            .collect();
        let mut atomic = Vec::new();
        let extents = reading_order
            .into_iter()
            .enumerate()
            .map(|(rank, id)| {
                let unit = by_id.get(&id).map(|&index| &units[index]);
                if unit.is_none_or(|unit| unit.text.is_none()) {
                    atomic.push(rank);
                }
                (id, unit.map_or(1, ContentUnit::extent))
            })
            .collect();

        Self {
            units,
            by_id,
            by_href,
            non_linear,
            locations: LocationModel::new(extents).with_atomic(atomic),
        }
    }

    /// Returns the [`ContentUnit`] with the given manifest `id`.
    ///
    /// # Errors
    /// [`NotFoundError::Resource`]: No resource with the given `id` exists.
    pub fn get(&self, id: &str) -> Result<&ContentUnit, NotFoundError> {
        self.by_id
            .get(id)
            .map(|&index| &self.units[index])
            .ok_or_else(|| NotFoundError::Resource(id.to_owned()))
    }

    /// Returns the [`ContentUnit`] at the given container path
    /// (e.g., `OEBPS/c1.xhtml`).
    ///
    /// The path is percent-decoded and normalized before lookup;
    /// a leading `/` is permitted and any fragment is ignored.
    pub fn by_href(&self, path: &str) -> Option<&ContentUnit> {
        let path = uri::to_container_path("", path);

        self.by_href.get(&path).map(|&index| &self.units[index])
    }

    /// The manifest ids in reading order (spine order).
    pub fn reading_order(&self) -> &[String] {
        self.locations.resources()
    }

    /// Returns `true` if the spine entry for `id` is marked `linear="no"`.
    ///
    /// Non-linear resources remain part of the reading order.
    pub fn is_non_linear(&self, id: &str) -> bool {
        self.non_linear.iter().any(|non_linear| non_linear == id)
    }

    /// Iterates over every resource in manifest order.
    pub fn iter(&self) -> std::slice::Iter<'_, ContentUnit> {
        self.units.iter()
    }

    /// The total number of resources.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if there are no resources.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The [`LocationModel`] derived from the reading order.
    pub fn locations(&self) -> &LocationModel {
        &self.locations
    }

    /// The per-resource ranges covered by the given [`Screen`], in reading order.
    ///
    /// Renderers use this to retrieve exactly what a screen displays.
    pub fn segments(&self, screen: &Screen) -> Vec<Segment<'_>> {
        let (Ok(first), Ok(last)) = (
            self.locations.rank(screen.begin().resource()),
            self.locations.rank(screen.end().resource()),
        ) else {
            return Vec::new();
        };
        let mut segments = Vec::new();

        for rank in first..=last {
            let Some((id, extent)) = self.locations.entry(rank) else {
                break;
            };
            let start = if rank == first { screen.begin().offset() } else { 0 };
            let end = if rank == last { screen.end().offset() } else { extent };

            // A screen ending at the start of the next resource does not cover it
            if rank == last && rank != first && end == 0 {
                break;
            }
            if let Ok(unit) = self.get(id) {
                segments.push(Segment {
                    unit,
                    range: (start, end.max(start)),
                });
            }
        }
        segments
    }

    /// Resolves a container path and optional fragment into a [`Location`].
    pub(crate) fn resolve(&self, path: &str, fragment: Option<&str>) -> Resolved {
        let Some(unit) = self.by_href.get(path).map(|&index| &self.units[index]) else {
            return Resolved::Missing;
        };
        if self.locations.rank(&unit.id).is_err() {
            return Resolved::OutsideReadingOrder;
        }

        let start = Location::new(unit.id.as_str(), 0);
        match fragment {
            None => Resolved::Exact(start),
            Some(fragment) => match unit.anchor(&uri::decode(fragment)) {
                Some(offset) => Resolved::Exact(Location::new(unit.id.as_str(), offset)),
                None => Resolved::UnknownFragment(start),
            },
        }
    }
}

/// Outcome of [`ContentStore::resolve`].
#[derive(Debug, PartialEq)]
pub(crate) enum Resolved {
    Exact(Location),
    /// The fragment names no element; holds the resource start location.
    UnknownFragment(Location),
    /// The resource exists but is not part of the spine.
    OutsideReadingOrder,
    /// No local resource exists at the path.
    Missing,
}

impl Debug for ContentStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("units", &self.units)
            .field("reading_order", &self.reading_order())
            .finish_non_exhaustive()
    }
}

impl<'ebook> IntoIterator for &'ebook ContentStore {
    type Item = &'ebook ContentUnit;
    type IntoIter = std::slice::Iter<'ebook, ContentUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
