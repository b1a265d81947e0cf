use crate::ebook::errors::LocationResult;
use crate::ebook::location::{Location, LocationModel};
use crate::paginator::layout::{LayoutConfig, RenditionLayout};

type Key = (usize, usize);

/// A contiguous range of the reading order shown at once.
///
/// A screen covers every location from [`Self::begin`] (inclusive) up to the
/// beginning of the next screen (exclusive).
/// The final screen also covers [`Self::end`], the end of the work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    index: usize,
    begin: Location,
    end: Location,
    begin_key: Key,
    end_key: Key,
    /// Begin key of the following screen; [`None`] for the final screen.
    limit: Option<Key>,
}

impl Screen {
    /// The zero-based position of the screen.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The first location shown.
    pub fn begin(&self) -> &Location {
        &self.begin
    }

    /// The location where the shown content ends.
    pub fn end(&self) -> &Location {
        &self.end
    }

    /// Returns `true` if this is the last screen of the work.
    pub fn is_final(&self) -> bool {
        self.limit.is_none()
    }

    /// Returns `true` if `location` is shown by this screen.
    ///
    /// # Errors
    /// [`LocationError`](crate::ebook::errors::LocationError):
    /// `location` does not belong to `model` or its offset exceeds the resource extent.
    pub fn contains(&self, location: &Location, model: &LocationModel) -> LocationResult<bool> {
        model.validate(location)?;
        let key = model.key(location)?;

        Ok(self.begin_key <= key
            && match self.limit {
                Some(limit) => key < limit,
                None => key <= self.end_key,
            })
    }

    pub(super) fn begin_key(&self) -> Key {
        self.begin_key
    }
}

/// Partitions the reading order of `locations` into screens.
///
/// The returned sequence is non-empty if the reading order is non-empty.
pub(super) fn compute(layout: &LayoutConfig, locations: &LocationModel) -> Vec<Screen> {
    let ranges = match layout.rendition() {
        RenditionLayout::Reflowable => reflow(locations, layout.capacity()),
        RenditionLayout::Paginated => fixed(locations, if layout.is_two_up() { 2 } else { 1 }),
    };
    let count = ranges.len();
    let mut screens = Vec::with_capacity(count);

    for (index, &(begin_key, end_key)) in ranges.iter().enumerate() {
        let (Some(begin), Some(end)) = (
            locations.location_at(begin_key),
            locations.location_at(end_key),
        ) else {
            continue;
        };
        screens.push(Screen {
            index,
            begin,
            end,
            begin_key,
            end_key,
            limit: ranges.get(index + 1).map(|&(next, _)| next),
        });
    }
    screens
}

/// Greedy packing: a screen is cut once it holds `capacity` units of extent.
/// Atomic resources occupy a screen of their own.
fn reflow(locations: &LocationModel, capacity: usize) -> Vec<(Key, Key)> {
    let capacity = capacity.max(1);
    let mut ranges = Vec::new();
    // Begin of the open screen and the extent it holds so far
    let mut open: Option<Key> = None;
    let mut filled = 0;
    let mut last = (0, 0);

    for rank in 0..locations.len() {
        let Some((_, extent)) = locations.entry(rank) else {
            break;
        };

        if locations.is_atomic(rank) {
            match open {
                Some(begin) if filled > 0 => {
                    ranges.push((begin, last));
                    open = Some((rank, 0));
                }
                // Only empty resources precede; they share the atomic screen
                Some(_) => {}
                None => open = Some((rank, 0)),
            }
            filled = capacity;
            last = (rank, extent);
            continue;
        }

        let mut offset = 0;
        // A cut landing exactly at a resource end begins the next screen here.
        // Empty resources stay on the full screen.
        if open.is_none() || (filled == capacity && extent > 0) {
            if let Some(begin) = open {
                ranges.push((begin, last));
            }
            open = Some((rank, 0));
            filled = 0;
        }
        while offset < extent {
            if filled == capacity {
                if let Some(begin) = open {
                    ranges.push((begin, (rank, offset)));
                }
                open = Some((rank, offset));
                filled = 0;
            }
            let taken = (capacity - filled).min(extent - offset);
            filled += taken;
            offset += taken;
        }
        last = (rank, extent);
    }

    if let Some(begin) = open {
        ranges.push((begin, last));
    }
    ranges
}

/// Fixed layout: `per_screen` resources per screen.
fn fixed(locations: &LocationModel, per_screen: usize) -> Vec<(Key, Key)> {
    (0..locations.len())
        .step_by(per_screen)
        .filter_map(|first| {
            let last = (first + per_screen).min(locations.len()) - 1;
            let (_, extent) = locations.entry(last)?;
            Some(((first, 0), (last, extent)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{compute, reflow};
    use crate::ebook::location::{Location, LocationModel};
    use crate::paginator::layout::{LayoutConfig, RenditionLayout, SpreadMode};

    fn model(entries: &[(&str, usize)]) -> LocationModel {
        LocationModel::new(
            entries
                .iter()
                .map(|&(id, extent)| (id.to_owned(), extent))
                .collect(),
        )
    }

    #[test]
    fn test_reflow() {
        let locations = model(&[("ch1", 2000), ("ch2", 500), ("ch3", 700)]);

        assert_eq!(
            vec![
                ((0, 0), (0, 1000)),
                ((0, 1000), (0, 2000)),
                // Exact cut at the end of ch1
                ((1, 0), (2, 500)),
                ((2, 500), (2, 700)),
            ],
            reflow(&locations, 1000)
        );
    }

    #[test]
    fn test_reflow_atomic() {
        let locations = model(&[("cover", 1), ("ch1", 30), ("image", 1), ("ch2", 5)])
            .with_atomic([0, 2]);

        assert_eq!(
            vec![
                ((0, 0), (0, 1)),
                ((1, 0), (1, 20)),
                ((1, 20), (1, 30)),
                ((2, 0), (2, 1)),
                ((3, 0), (3, 5)),
            ],
            reflow(&locations, 20)
        );
    }

    #[test]
    fn test_reflow_empty_resource() {
        let locations = model(&[("ch1", 10), ("blank", 0), ("ch2", 10)]);

        assert_eq!(vec![((0, 0), (2, 5)), ((2, 5), (2, 10))], reflow(&locations, 15));

        let trailing = model(&[("blank", 0), ("image", 1), ("ch1", 10), ("end", 0)])
            .with_atomic([1]);
        assert_eq!(
            vec![((0, 0), (1, 1)), ((2, 0), (3, 0))],
            reflow(&trailing, 10)
        );
    }

    #[test]
    fn test_paginated() {
        let locations = model(&[("p1", 1), ("p2", 1), ("p3", 1)]);
        let spread = LayoutConfig::builder()
            .rendition(RenditionLayout::Paginated)
            .spread(SpreadMode::Both)
            .build()
            .unwrap();
        let screens = compute(&spread, &locations);

        assert_eq!(2, screens.len());
        assert_eq!(&Location::new("p2", 1), screens[0].end());
        assert_eq!(&Location::new("p3", 0), screens[1].begin());
        assert!(screens[1].is_final());
    }

    #[test]
    fn test_contains() {
        let locations = model(&[("ch1", 100), ("ch2", 100)]);
        let layout = LayoutConfig::builder().width(100.0).build().unwrap();
        let screens = compute(&layout, &locations);

        assert_eq!(2, screens.len());
        // The end of ch1 precedes the start of ch2
        assert!(screens[0].contains(&Location::new("ch1", 100), &locations).unwrap());
        assert!(!screens[0].contains(&Location::new("ch2", 0), &locations).unwrap());
        assert!(screens[1].contains(&Location::new("ch2", 100), &locations).unwrap());
        assert!(screens[1].contains(&Location::new("ch9", 0), &locations).is_err());
        assert!(screens[0].contains(&Location::new("ch1", 99999), &locations).is_err());
    }
}
