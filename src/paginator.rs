//! Screen-based navigation over the reading order.
//!
//! A [`Paginator`] partitions the reading order of a work into [`Screen`]
//! instances according to a [`LayoutConfig`] and tracks the current position.
//!
//! # States
//! - **Unpaginated**: Created with [`Paginator::new`]; no screens exist
//!   and navigation returns [`PaginatorError::Unpaginated`].
//! - **Ready**: A layout is applied. Applying another layout recomputes
//!   every screen and re-derives the current screen from the current
//!   [`Location`].
//!
//! # Examples
//! - Navigating screens and returning through history:
//! ```
//! # use folio::Epub;
//! # use folio::ebook::location::Location;
//! # use folio::paginator::LayoutConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let epub = Epub::open("tests/ebooks/example_epub")?;
//! let mut paginator = epub.paginator_with(LayoutConfig::builder().width(100.0).build()?)?;
//! assert!(paginator.is_first_screen());
//!
//! // Jumping to the start of the second chapter
//! let target = Location::new("c2", 0);
//! let screen = paginator.goto_location(&target)?;
//! assert!(screen.contains(&target, epub.content().locations())?);
//!
//! // Returning to where the jump began
//! let screen = paginator.back()?;
//! assert_eq!(0, screen.index());
//! # Ok(())
//! # }
//! ```

pub mod errors;
mod history;
pub mod layout;
mod screen;

use crate::ebook::location::{Location, LocationModel};
use crate::paginator::history::History;
use log::{debug, trace};

pub use self::{
    errors::{ConfigError, PaginatorError, PaginatorResult},
    layout::{LayoutConfig, LayoutConfigBuilder, Margins, Orientation, RenditionLayout, SpreadMode},
    screen::Screen,
};

/// Stateful navigation over the [`Screen`] partition of a work.
///
/// A paginator borrows the [`LocationModel`] of a loaded
/// [`Epub`](crate::Epub) and holds the only mutable reading state:
/// the current [`Location`], the current screen and the navigation history.
///
/// Every navigation operation records the prior location in the history,
/// except [`Self::back`].
/// A failed operation never modifies the state of a paginator.
///
/// # See Also
/// - [`Epub::paginator`](crate::Epub::paginator)
/// - [`Epub::paginator_with`](crate::Epub::paginator_with)
#[derive(Clone, Debug)]
pub struct Paginator<'ebook> {
    model: &'ebook LocationModel,
    pagination: Option<Pagination>,
    position: Location,
    history: History,
}

#[derive(Clone, Debug)]
struct Pagination {
    layout: LayoutConfig,
    screens: Vec<Screen>,
    index: usize,
}

impl<'ebook> Paginator<'ebook> {
    /// Creates an unpaginated instance positioned at the start of the work.
    pub fn new(model: &'ebook LocationModel) -> Self {
        Self {
            model,
            pagination: None,
            // The reading order of a loaded work is never empty
            position: model.start().unwrap_or_else(|| Location::new(String::new(), 0)),
            history: History::default(),
        }
    }

    /// Creates an instance positioned on the first screen of `layout`.
    ///
    /// # Errors
    /// [`PaginatorError::InvalidConfig`]: The layout is unusable.
    pub fn with_layout(
        model: &'ebook LocationModel,
        layout: LayoutConfig,
    ) -> PaginatorResult<Self> {
        let mut paginator = Self::new(model);
        paginator.set_layout(layout)?;
        Ok(paginator)
    }

    /// Retains at most `limit` history entries, discarding the oldest first.
    ///
    /// By default, history is unbounded.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history.set_limit(Some(limit));
        self
    }

    /// Applies `layout`, recomputing every screen.
    ///
    /// The current location is retained and the current screen becomes
    /// the one containing it.
    /// Applying the same layout again yields the same screens and position.
    ///
    /// # Errors
    /// [`PaginatorError::InvalidConfig`]: The layout is unusable.
    pub fn set_layout(&mut self, layout: LayoutConfig) -> PaginatorResult<()> {
        layout.validate()?;

        let screens = screen::compute(&layout, self.model);
        let index = self
            .model
            .key(&self.position)
            .map(|key| locate(&screens, key))
            .unwrap_or_default();

        debug!(
            "Computed {} screen(s) with a capacity of {} ({:?}, spread {})",
            screens.len(),
            layout.capacity(),
            layout.rendition(),
            layout.spread(),
        );
        self.pagination = Some(Pagination {
            layout,
            screens,
            index,
        });
        Ok(())
    }

    /// The applied layout, or [`None`] while unpaginated.
    pub fn layout(&self) -> Option<&LayoutConfig> {
        self.pagination.as_ref().map(|pagination| &pagination.layout)
    }

    /// The location model the screens are derived from.
    pub fn locations(&self) -> &'ebook LocationModel {
        self.model
    }

    /// The current screen.
    ///
    /// # Errors
    /// [`PaginatorError::Unpaginated`]: No layout has been applied.
    pub fn current_screen(&self) -> PaginatorResult<&Screen> {
        let pagination = self.pagination()?;
        pagination
            .screens
            .get(pagination.index)
            .ok_or(PaginatorError::Unpaginated)
    }

    /// The current location.
    ///
    /// Screen-wise navigation moves this to the beginning of the new screen,
    /// while [`Self::goto_location`] sets it exactly.
    pub fn current_location(&self) -> &Location {
        &self.position
    }

    /// Every computed screen in order; empty while unpaginated.
    pub fn screens(&self) -> &[Screen] {
        self.pagination
            .as_ref()
            .map_or(&[], |pagination| pagination.screens.as_slice())
    }

    /// The number of computed screens; `0` while unpaginated.
    pub fn screen_count(&self) -> usize {
        self.screens().len()
    }

    /// Returns `true` if the current screen is the first.
    ///
    /// Always `false` while unpaginated.
    pub fn is_first_screen(&self) -> bool {
        self.current_screen()
            .is_ok_and(|screen| screen.index() == 0)
    }

    /// Returns `true` if the current screen is the last.
    ///
    /// Always `false` while unpaginated.
    pub fn is_final_screen(&self) -> bool {
        self.current_screen().is_ok_and(Screen::is_final)
    }

    /// Advances to the following screen.
    ///
    /// # Errors
    /// - [`PaginatorError::Unpaginated`]: No layout has been applied.
    /// - [`PaginatorError::AtBoundary`]: The current screen is the last.
    pub fn next_screen(&mut self) -> PaginatorResult<&Screen> {
        let index = self.pagination()?.index;

        if self.is_final_screen() {
            trace!("Refused to advance beyond final screen `{index}`");
            return Err(PaginatorError::AtBoundary { index });
        }
        self.goto_index(index + 1)
    }

    /// Returns to the preceding screen.
    ///
    /// # Errors
    /// - [`PaginatorError::Unpaginated`]: No layout has been applied.
    /// - [`PaginatorError::AtBoundary`]: The current screen is the first.
    pub fn previous_screen(&mut self) -> PaginatorResult<&Screen> {
        let index = self.pagination()?.index;

        if index == 0 {
            trace!("Refused to retreat before the first screen");
            return Err(PaginatorError::AtBoundary { index });
        }
        self.goto_index(index - 1)
    }

    /// Moves to the screen at `index`.
    ///
    /// # Errors
    /// - [`PaginatorError::Unpaginated`]: No layout has been applied.
    /// - [`PaginatorError::OutOfRange`]: `index` is not less than [`Self::screen_count`].
    pub fn goto_screen(&mut self, index: usize) -> PaginatorResult<&Screen> {
        self.goto_index(index)
    }

    /// Moves to the screen containing `location`,
    /// which becomes the current location.
    ///
    /// # Errors
    /// - [`PaginatorError::Unpaginated`]: No layout has been applied.
    /// - [`PaginatorError::InvalidLocation`]: The resource is not in the
    ///   reading order or the offset exceeds its extent.
    pub fn goto_location(&mut self, location: &Location) -> PaginatorResult<&Screen> {
        self.pagination()?;
        self.model.validate(location)?;

        let index = self.index_of(location)?;
        self.navigate(index, location.clone(), true)
    }

    /// Moves to the first screen, positioned at the start of the work.
    ///
    /// # Errors
    /// [`PaginatorError::Unpaginated`]: No layout has been applied.
    pub fn begin_document(&mut self) -> PaginatorResult<&Screen> {
        self.goto_index(0)
    }

    /// Moves to the final screen, positioned at the end of the work.
    ///
    /// # Errors
    /// [`PaginatorError::Unpaginated`]: No layout has been applied.
    pub fn end_document(&mut self) -> PaginatorResult<&Screen> {
        let count = self.pagination()?.screens.len();
        let end = self.model.end().ok_or(PaginatorError::Unpaginated)?;

        self.navigate(count.saturating_sub(1), end, true)
    }

    /// Removes and returns the most recently recorded location
    /// without navigating to it.
    ///
    /// # Errors
    /// [`PaginatorError::EmptyHistory`]: No location has been recorded.
    pub fn pop_history(&mut self) -> PaginatorResult<Location> {
        self.history.pop().ok_or(PaginatorError::EmptyHistory)
    }

    /// Removes the most recently recorded location and navigates to it.
    ///
    /// Unlike every other navigation, the location left is not recorded.
    ///
    /// # Errors
    /// - [`PaginatorError::Unpaginated`]: No layout has been applied.
    /// - [`PaginatorError::EmptyHistory`]: No location has been recorded.
    pub fn back(&mut self) -> PaginatorResult<&Screen> {
        self.pagination()?;

        let Some(location) = self.history.last() else {
            trace!("Refused to go back: history is empty");
            return Err(PaginatorError::EmptyHistory);
        };
        let index = self.index_of(location)?;
        let location = location.clone();

        self.history.pop();
        self.navigate(index, location, false)
    }

    /// The recorded locations, oldest first.
    pub fn history(&self) -> impl DoubleEndedIterator<Item = &Location> {
        self.history.iter()
    }

    fn pagination(&self) -> PaginatorResult<&Pagination> {
        self.pagination.as_ref().ok_or(PaginatorError::Unpaginated)
    }

    fn index_of(&self, location: &Location) -> PaginatorResult<usize> {
        let key = self.model.key(location)?;
        Ok(locate(&self.pagination()?.screens, key))
    }

    fn goto_index(&mut self, index: usize) -> PaginatorResult<&Screen> {
        let screens = &self.pagination()?.screens;
        let Some(screen) = screens.get(index) else {
            trace!("Refused screen `{index}`: only {} screen(s) exist", screens.len());
            return Err(PaginatorError::OutOfRange {
                index,
                count: screens.len(),
            });
        };
        let location = screen.begin().clone();

        self.navigate(index, location, true)
    }

    /// Commits a navigation. `index` must be a valid screen index.
    fn navigate(
        &mut self,
        index: usize,
        location: Location,
        record: bool,
    ) -> PaginatorResult<&Screen> {
        let pagination = self
            .pagination
            .as_mut()
            .ok_or(PaginatorError::Unpaginated)?;
        let count = pagination.screens.len();

        if index >= count {
            return Err(PaginatorError::OutOfRange { index, count });
        }
        let prior = std::mem::replace(&mut self.position, location);
        if record {
            self.history.push(prior);
        }
        pagination.index = index;

        Ok(&pagination.screens[index])
    }
}

/// The index of the last screen beginning at or before `key`.
fn locate(screens: &[Screen], key: (usize, usize)) -> usize {
    screens
        .partition_point(|screen| screen.begin_key() <= key)
        .saturating_sub(1)
}
