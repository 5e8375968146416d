//! Search index trait definition.
//!
//! This module defines the abstract interface for index lifecycle and bulk
//! write operations, allowing for different backend implementations
//! (OpenSearch, Elasticsearch, in-memory test doubles).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use talks_indexer_shared::Talk;

/// Abstract interface for the search engine operations the reindexer needs.
///
/// Every method takes the target index name explicitly, so a single client
/// serves both the private and the public talk index.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>` for consistent error handling.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Upsert every talk into the index, keyed by talk id, in one request.
    ///
    /// # Arguments
    ///
    /// * `index` - The target index name
    /// * `talks` - Documents to write; an empty slice is a no-op success
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every document was indexed
    /// * `Err(SearchError::BulkIndexError)` - If the request failed or the
    ///   search engine reported an error for any document
    async fn bulk_index(&self, index: &str, talks: &[Talk]) -> Result<(), SearchError>;

    /// Delete an index.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was deleted or did not exist
    /// * `Err(SearchError)` - If the deletion fails
    async fn delete_index(&self, index: &str) -> Result<(), SearchError>;

    /// Create an index with the given settings and mappings.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `mapping` - Index creation body (`settings` and `mappings`)
    async fn create_index(&self, index: &str, mapping: &Value) -> Result<(), SearchError>;

    /// Check whether an index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` / `Ok(false)` - Whether the index exists
    /// * `Err(SearchError)` - If the check could not be performed
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
