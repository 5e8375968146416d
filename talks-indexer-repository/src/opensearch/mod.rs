//! OpenSearch implementation of the search index.
//!
//! This module provides a concrete implementation of `SearchIndex`
//! using OpenSearch as the backend, and the talk index mappings.

mod client;
mod index_config;

pub use client::OpenSearchClient;
pub use index_config::{
    talk_private_index_mapping, talk_public_index_mapping, DEFAULT_PRIVATE_INDEX,
    DEFAULT_PUBLIC_INDEX,
};
