use crate::ebook::location::Location;
use std::collections::VecDeque;

/// Locations visited before each navigation, most recent last.
#[derive(Clone, Debug, Default)]
pub(super) struct History {
    entries: VecDeque<Location>,
    limit: Option<usize>,
}

impl History {
    /// Retains at most `limit` entries, discarding the oldest first.
    pub(super) fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.truncate();
    }

    pub(super) fn push(&mut self, location: Location) {
        self.entries.push_back(location);
        self.truncate();
    }

    pub(super) fn pop(&mut self) -> Option<Location> {
        self.entries.pop_back()
    }

    pub(super) fn last(&self) -> Option<&Location> {
        self.entries.back()
    }

    pub(super) fn iter(&self) -> impl DoubleEndedIterator<Item = &Location> {
        self.entries.iter()
    }

    fn truncate(&mut self) {
        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
    }
}
