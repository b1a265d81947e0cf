//! Error-related types for a [`Paginator`](super::Paginator).

use crate::ebook::errors::LocationError;
use thiserror::Error;

/// Alias for `Result<T, PaginatorError>`.
pub type PaginatorResult<T> = Result<T, PaginatorError>;

/// Possible errors from a [`Paginator`](super::Paginator).
///
/// A failed operation never modifies the state of a paginator.
///
/// # Variants
/// ## Input Errors
/// Indicates the caller provided invalid arguments which can be corrected.
/// - [`InvalidConfig`](PaginatorError::InvalidConfig)
/// - [`InvalidLocation`](PaginatorError::InvalidLocation)
/// - [`OutOfRange`](PaginatorError::OutOfRange)
/// ## State Errors
/// The operation is not applicable to the current state.
/// - [`Unpaginated`](PaginatorError::Unpaginated)
/// - [`AtBoundary`](PaginatorError::AtBoundary)
/// - [`EmptyHistory`](PaginatorError::EmptyHistory)
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaginatorError {
    /// No layout has been applied; screens are not yet computed.
    #[error("[Unpaginated]: A layout must be applied before navigating")]
    Unpaginated,

    /// The supplied [`LayoutConfig`](super::LayoutConfig) is unusable.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    /// The supplied [`Location`](crate::ebook::location::Location) does not address the work.
    #[error(transparent)]
    InvalidLocation(#[from] LocationError),

    /// A screen index is beyond the screen count; out-of-range.
    #[error("[OutOfRange]: The screen index `{index}` must be less than the count `{count}`")]
    OutOfRange {
        /// The requested out-of-range index.
        index: usize,
        /// The number of screens.
        count: usize,
    },

    /// There is no screen beyond the current one in the requested direction.
    #[error("[AtBoundary]: No screen beyond screen `{index}` in that direction")]
    AtBoundary {
        /// The index of the current screen.
        index: usize,
    },

    /// The history holds no prior location.
    #[error("[EmptyHistory]: No prior location to return to")]
    EmptyHistory,
}

/// Faults of a [`LayoutConfig`](super::LayoutConfig).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The page width is not a positive, finite number.
    #[error("Page width must be positive and finite: {0}")]
    InvalidWidth(f64),

    /// A margin is negative or not finite.
    #[error("Margins must be non-negative and finite: {0}")]
    InvalidMargin(f64),

    /// The spread gutter is negative or not finite.
    #[error("Gutter must be non-negative and finite: {0}")]
    InvalidGutter(f64),

    /// Margins (and the gutter) consume the entire page width.
    #[error("Margins and gutter leave no usable area within a width of {width}")]
    NoUsableArea {
        /// The configured page width.
        width: f64,
    },

    /// A textual layout value could not be parsed.
    #[error("Invalid value for `{field}`: `{value}`")]
    InvalidValue {
        /// The name of the field being parsed (e.g., `spread`).
        field: &'static str,
        /// The offending input.
        value: String,
    },
}
