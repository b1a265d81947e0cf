//! Core ebook modules and the [`Epub`](epub::Epub) implementation.
//!
//! # Overview
//! Loading an [`Epub`](epub::Epub) reads every container entry once
//! and produces four immutable, `'ebook`-scoped views.
//!
//! ## Components
//! - [`content`]: Resources and the reading order they form.
//! - [`location`]: Addressable positions within the reading order.
//! - [`nav`]: Navigation trees (toc, page list, landmarks, custom groups).
//! - [`metadata`]: Namespaced metadata statements and their refinements.
//!
//! ## Supporting Components
//! - [`errors`]: Ebook-related error types.

pub(super) mod archive;
pub mod content;
pub mod epub;
pub mod errors;
pub mod location;
pub mod metadata;
pub mod nav;
