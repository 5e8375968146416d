//! Loader module for the reindex pipeline.
//!
//! Owns the index lifecycle (recreate, ensure-exists) and writes the private
//! and public documents to their indexes.

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::cancellation::until_cancelled;
use crate::errors::{IndexOperation, ReindexError};
use crate::processor::{private_documents, public_documents};
use talks_indexer_repository::opensearch::{
    talk_private_index_mapping, talk_public_index_mapping, DEFAULT_PRIVATE_INDEX,
    DEFAULT_PUBLIC_INDEX,
};
use talks_indexer_repository::SearchIndex;
use talks_indexer_shared::Talk;

/// Names and creation bodies of the two talk indexes.
#[derive(Debug, Clone)]
pub struct IndexSettings {
    pub private_index: String,
    pub public_index: String,
    pub private_mapping: Value,
    pub public_mapping: Value,
}

impl IndexSettings {
    /// Settings for the given index names with the standard talk mappings.
    pub fn new(private_index: impl Into<String>, public_index: impl Into<String>) -> Self {
        Self {
            private_index: private_index.into(),
            public_index: public_index.into(),
            private_mapping: talk_private_index_mapping(),
            public_mapping: talk_public_index_mapping(),
        }
    }

    /// The private mapping for the private index name, the public mapping for
    /// anything else.
    pub fn mapping_for(&self, index: &str) -> &Value {
        if index == self.private_index {
            &self.private_mapping
        } else {
            &self.public_mapping
        }
    }
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self::new(DEFAULT_PRIVATE_INDEX, DEFAULT_PUBLIC_INDEX)
    }
}

/// Loader that manages both talk indexes and writes documents to them.
pub struct SearchLoader {
    client: Arc<dyn SearchIndex>,
    settings: IndexSettings,
}

impl SearchLoader {
    pub fn new(client: Arc<dyn SearchIndex>, settings: IndexSettings) -> Self {
        Self { client, settings }
    }

    /// Delete and recreate the private index, then the public index.
    ///
    /// A failure leaves the indexes as they are at that point.
    pub async fn recreate_indexes(&self, cancel: &CancellationToken) -> Result<(), ReindexError> {
        self.recreate_index(&self.settings.private_index, cancel).await?;
        self.recreate_index(&self.settings.public_index, cancel).await
    }

    /// Create the private and public indexes if they are absent.
    pub async fn ensure_indexes(&self, cancel: &CancellationToken) -> Result<(), ReindexError> {
        self.ensure_index_exists(&self.settings.private_index, cancel)
            .await?;
        self.ensure_index_exists(&self.settings.public_index, cancel)
            .await
    }

    #[instrument(skip(self, cancel))]
    async fn recreate_index(&self, index: &str, cancel: &CancellationToken) -> Result<(), ReindexError> {
        info!(index = %index, "Recreating index");

        until_cancelled(cancel, self.client.delete_index(index))
            .await?
            .map_err(|e| {
                error!(index = %index, error = %e, "Failed to delete index");
                ReindexError::index_lifecycle(index, IndexOperation::Delete, e)
            })?;

        self.create_index(index, cancel).await
    }

    #[instrument(skip(self, cancel))]
    async fn ensure_index_exists(
        &self,
        index: &str,
        cancel: &CancellationToken,
    ) -> Result<(), ReindexError> {
        let exists = until_cancelled(cancel, self.client.index_exists(index))
            .await?
            .map_err(|e| ReindexError::index_lifecycle(index, IndexOperation::CheckExists, e))?;

        if exists {
            debug!(index = %index, "Index already exists");
            return Ok(());
        }

        info!(index = %index, "Index does not exist, creating");
        self.create_index(index, cancel).await
    }

    async fn create_index(&self, index: &str, cancel: &CancellationToken) -> Result<(), ReindexError> {
        let mapping = self.settings.mapping_for(index);

        until_cancelled(cancel, self.client.create_index(index, mapping))
            .await?
            .map_err(|e| {
                error!(index = %index, error = %e, "Failed to create index");
                ReindexError::index_lifecycle(index, IndexOperation::Create, e)
            })
    }

    /// Write the private projection of every talk to the private index in one
    /// batch. Returns the number of documents written.
    #[instrument(skip(self, talks, cancel), fields(talk_count = talks.len()))]
    pub async fn write_private(
        &self,
        talks: &[Talk],
        cancel: &CancellationToken,
    ) -> Result<usize, ReindexError> {
        let documents = private_documents(talks);
        self.write(&self.settings.private_index, &documents, cancel)
            .await
    }

    /// Write the public projection of the publicly visible talks to the
    /// public index in one batch, which may be empty. Returns the number of
    /// documents written.
    #[instrument(skip(self, talks, cancel), fields(talk_count = talks.len()))]
    pub async fn write_public(
        &self,
        talks: &[Talk],
        cancel: &CancellationToken,
    ) -> Result<usize, ReindexError> {
        let documents = public_documents(talks);
        self.write(&self.settings.public_index, &documents, cancel)
            .await
    }

    async fn write(
        &self,
        index: &str,
        documents: &[Talk],
        cancel: &CancellationToken,
    ) -> Result<usize, ReindexError> {
        until_cancelled(cancel, self.client.bulk_index(index, documents))
            .await?
            .map_err(|e| {
                error!(index = %index, count = documents.len(), error = %e, "Failed to index talks");
                ReindexError::bulk_write(index, e)
            })?;

        debug!(index = %index, count = documents.len(), "Indexed talks");
        Ok(documents.len())
    }
}
