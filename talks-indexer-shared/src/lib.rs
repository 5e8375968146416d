//! # Talks Indexer Shared
//!
//! Shared types for the talks indexer: the conference and talk records
//! fetched from the talk source, and the two projections of a talk that are
//! written to the private and public search indexes.

mod conference;
mod talk;

pub use conference::Conference;
pub use talk::{Speaker, Talk, TalkStatus};

/// Open field name to value mapping used for talk and speaker data.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;
