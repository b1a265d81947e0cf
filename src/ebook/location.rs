//! Canonical, totally ordered positions within the reading order.

use crate::ebook::errors::{LocationError, LocationResult};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};

/// A position within a work: a spine resource and an offset into its
/// [extent](crate::ebook::content::ContentUnit::extent).
///
/// An offset equal to the extent denotes the *end of the resource*,
/// which is a valid boundary location.
///
/// Locations are plain data; ordering them requires the [`LocationModel`]
/// of the work they belong to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    resource: String,
    offset: usize,
}

impl Location {
    /// Creates a location from a manifest id and an offset.
    ///
    /// The location is not validated until it is used with a [`LocationModel`].
    pub fn new(resource: impl Into<String>, offset: usize) -> Self {
        Self {
            resource: resource.into(),
            offset,
        }
    }

    /// The manifest id of the resource.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The intra-resource offset.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.resource, self.offset)
    }
}

/// Derives the total order over all [`Location`] instances of a work.
///
/// Locations are ordered by the reading-order rank of their resource,
/// then by offset. Resource ids themselves are never compared.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationModel {
    resources: Vec<String>,
    extents: Vec<usize>,
    /// Cumulative extent preceding each rank.
    starts: Vec<usize>,
    ranks: HashMap<String, usize>,
    /// Ranks of resources displayed as a whole (e.g., images).
    atomic: HashSet<usize>,
    total: usize,
}

impl LocationModel {
    /// `entries` are `(manifest id, extent)` pairs in reading order.
    pub(crate) fn new(entries: Vec<(String, usize)>) -> Self {
        let mut resources = Vec::with_capacity(entries.len());
        let mut extents = Vec::with_capacity(entries.len());
        let mut starts = Vec::with_capacity(entries.len());
        let mut ranks = HashMap::with_capacity(entries.len());
        let mut total = 0;

        for (rank, (id, extent)) in entries.into_iter().enumerate() {
            ranks.insert(id.clone(), rank);
            resources.push(id);
            extents.push(extent);
            starts.push(total);
            total += extent;
        }

        Self {
            resources,
            extents,
            starts,
            ranks,
            atomic: HashSet::new(),
            total,
        }
    }

    /// Marks the resources at the given ranks as atomic.
    pub(crate) fn with_atomic(mut self, ranks: impl IntoIterator<Item = usize>) -> Self {
        self.atomic.extend(ranks);
        self
    }

    /// The manifest ids in reading order.
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    /// The number of resources in the reading order.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if the reading order is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// The sum of all extents in the reading order.
    pub fn total_extent(&self) -> usize {
        self.total
    }

    /// The zero-based reading-order position of a resource.
    ///
    /// # Errors
    /// [`LocationError::UnknownResource`]: `resource` is not in the reading order.
    pub fn rank(&self, resource: &str) -> LocationResult<usize> {
        self.ranks
            .get(resource)
            .copied()
            .ok_or_else(|| LocationError::UnknownResource(resource.to_owned()))
    }

    /// The extent of a resource; the greatest valid offset.
    ///
    /// # Errors
    /// [`LocationError::UnknownResource`]: `resource` is not in the reading order.
    pub fn extent(&self, resource: &str) -> LocationResult<usize> {
        self.rank(resource).map(|rank| self.extents[rank])
    }

    /// The first location of the work.
    ///
    /// Returns [`None`] if the reading order is empty.
    pub fn start(&self) -> Option<Location> {
        self.resources.first().map(|id| Location::new(id.as_str(), 0))
    }

    /// The end-of-work location: the end of the last resource.
    ///
    /// Returns [`None`] if the reading order is empty.
    pub fn end(&self) -> Option<Location> {
        self.resources
            .last()
            .zip(self.extents.last())
            .map(|(id, &extent)| Location::new(id.as_str(), extent))
    }

    /// Compares two locations.
    ///
    /// # Errors
    /// [`LocationError::UnknownResource`]: Either resource is not in the reading order.
    ///
    /// # Examples
    /// ```
    /// # use folio::ebook::location::Location;
    /// # use folio::Epub;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let epub = Epub::open("tests/ebooks/example_epub")?;
    /// let model = epub.content().locations();
    ///
    /// let a = Location::new("c1", 500);
    /// let b = Location::new("c2", 0);
    /// assert!(model.compare(&a, &b)?.is_lt());
    /// # Ok(())
    /// # }
    /// ```
    pub fn compare(&self, a: &Location, b: &Location) -> LocationResult<Ordering> {
        Ok(self.key(a)?.cmp(&self.key(b)?))
    }

    /// Clamps the offset of `location` into `[0, extent]`.
    ///
    /// This is the only operation that silently adjusts an offset.
    ///
    /// # Errors
    /// [`LocationError::UnknownResource`]: The resource is not in the reading order.
    pub fn normalize(&self, location: &Location) -> LocationResult<Location> {
        let extent = self.extent(&location.resource)?;

        Ok(Location::new(
            location.resource.as_str(),
            location.offset.min(extent),
        ))
    }

    /// Ensures `location` addresses this work without adjustment.
    ///
    /// # Errors
    /// - [`LocationError::UnknownResource`]: The resource is not in the reading order.
    /// - [`LocationError::OffsetOutOfRange`]: The offset exceeds the resource extent.
    pub fn validate(&self, location: &Location) -> LocationResult<()> {
        let extent = self.extent(&location.resource)?;

        if location.offset > extent {
            return Err(LocationError::OffsetOutOfRange {
                resource: location.resource.clone(),
                offset: location.offset,
                extent,
            });
        }
        Ok(())
    }

    /// The fraction of the work preceding `location`, within `[0, 1]`.
    ///
    /// # Errors
    /// - [`LocationError::UnknownResource`]: The resource is not in the reading order.
    /// - [`LocationError::OffsetOutOfRange`]: The offset exceeds the resource extent.
    pub fn progression(&self, location: &Location) -> LocationResult<f64> {
        self.validate(location)?;
        let rank = self.rank(&location.resource)?;

        if self.total == 0 {
            return Ok(0.0);
        }
        let position = self.starts[rank] + location.offset;

        Ok(position as f64 / self.total as f64)
    }

    /// The sort key of a location: `(rank, offset)`.
    pub(crate) fn key(&self, location: &Location) -> LocationResult<(usize, usize)> {
        Ok((self.rank(&location.resource)?, location.offset))
    }

    /// The `(manifest id, extent)` pair at `rank`.
    pub(crate) fn entry(&self, rank: usize) -> Option<(&str, usize)> {
        self.resources
            .get(rank)
            .map(|id| (id.as_str(), self.extents[rank]))
    }

    /// Returns `true` if the resource at `rank` cannot be split across screens.
    pub(crate) fn is_atomic(&self, rank: usize) -> bool {
        self.atomic.contains(&rank)
    }

    pub(crate) fn location_at(&self, (rank, offset): (usize, usize)) -> Option<Location> {
        self.resources
            .get(rank)
            .map(|id| Location::new(id.as_str(), offset))
    }
}
