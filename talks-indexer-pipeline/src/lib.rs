//! # Talks Indexer Pipeline
//!
//! This crate provides the reindex orchestration engine: it fetches talks
//! from the talk source and writes them to the private and public search
//! indexes.
//!
//! ## Architecture
//!
//! 1. **Processor**: Derives the private and public projections of talks
//! 2. **Loader**: Manages the index lifecycle and issues the bulk writes
//! 3. **Orchestrator**: Coordinates fetch, transform, lifecycle and write for
//!    a full reindex, one conference, or one talk

mod cancellation;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;

#[cfg(test)]
mod testing;

pub use errors::{IndexOperation, ReindexError};
pub use loader::{IndexSettings, SearchLoader};
pub use orchestrator::{Indexer, ReindexSummary, Reindexer};
