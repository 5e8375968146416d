//! # Talks Indexer Repository
//!
//! This crate provides the search index interface used by the reindex
//! orchestrator, and a concrete implementation for OpenSearch. It includes
//! definitions for errors, the index lifecycle and bulk write interface, and
//! the static mappings of the private and public talk indexes.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use config::OpenSearchConfig;
pub use errors::SearchError;
pub use interfaces::SearchIndex;
pub use opensearch::OpenSearchClient;
