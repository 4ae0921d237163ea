//! Content collection abstraction for the docnav sidebar engine.
//!
//! This crate provides a [`ContentStore`] trait for looking up documents in
//! named content collections without knowing where they live. This enables:
//!
//! - **Unit testing** the sidebar resolver without touching the filesystem
//! - **Backend flexibility** (filesystem today, anything with ids tomorrow)
//! - **Clean separation** between navigation logic and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Document`], the read-only collection entry
//! - [`ContentStore`] trait with `get_entry()`, `get_collection()` and
//!   `get_directory()`
//! - [`MockStore`] for testing (behind `mock` feature flag)
//! - Id helpers ([`strip_index`], [`is_within`], [`last_segment`])
//!
//! # Example
//!
//! ```ignore
//! use docnav_content::{ContentStore, MockStore};
//!
//! let store = MockStore::new()
//!     .with_document("docs", "guides/intro", "Introduction");
//! let doc = store.get_entry("docs", "guides/intro").await?;
//! ```

mod document;
mod id;
#[cfg(feature = "mock")]
mod mock;
mod store;

pub use document::Document;
pub use id::{is_within, join_segments, last_segment, parent_slug, segments, strip_index};
#[cfg(feature = "mock")]
pub use mock::MockStore;
pub use store::{ContentError, ContentErrorKind, ContentStore};
