//! Interface definitions for the search index.
//!
//! This module defines the abstract `SearchIndex` trait that allows for
//! dependency injection and swappable search backend implementations.

mod search_index;

pub use search_index::SearchIndex;
