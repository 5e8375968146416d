//! Dependency initialization and wiring for the talks indexer.

use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::IndexingError;
use talks_indexer_pipeline::{IndexSettings, Reindexer};
use talks_indexer_repository::{OpenSearchClient, SearchIndex};
use talks_indexer_source::MoresleepClient;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured reindexer, ready to run any operation.
    pub reindexer: Arc<Reindexer>,
}

impl Dependencies {
    /// Build the moresleep and OpenSearch clients and wire them into a
    /// reindexer.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError::SourceError)` - If the moresleep client cannot be
    ///   created
    /// * `Err(IndexingError::SearchError)` - If the OpenSearch client cannot be
    ///   created or the health check fails to execute
    /// * `Err(IndexingError::ConfigError)` - If the cluster reports red
    pub async fn new(settings: &Settings) -> Result<Self, IndexingError> {
        info!(
            mode = %settings.mode,
            moresleep_url = %settings.moresleep.url,
            opensearch_url = %settings.opensearch.url,
            private_index = %settings.private_index,
            public_index = %settings.public_index,
            "Initializing dependencies"
        );

        let talk_source = MoresleepClient::new(&settings.moresleep)?;
        let search_client = OpenSearchClient::new(&settings.opensearch).await?;

        // Verify OpenSearch is reachable
        if !search_client.health_check().await? {
            return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        let index_settings = IndexSettings::new(&settings.private_index, &settings.public_index);
        let reindexer = Reindexer::new(
            Arc::new(talk_source),
            Arc::new(search_client),
            index_settings,
        );

        Ok(Self {
            reindexer: Arc::new(reindexer),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use talks_indexer_repository::{OpenSearchConfig, SearchError};
    use talks_indexer_source::{MoresleepConfig, SourceError};

    fn settings(moresleep_url: &str, opensearch_url: &str) -> Settings {
        Settings {
            mode: Mode::Development,
            moresleep: MoresleepConfig::new(moresleep_url),
            opensearch: OpenSearchConfig::new(opensearch_url),
            private_index: "javazone_private".to_string(),
            public_index: "javazone_public".to_string(),
        }
    }

    #[tokio::test]
    async fn test_invalid_moresleep_url_is_source_error() {
        let result = Dependencies::new(&settings("not a url", "http://localhost:9200")).await;

        assert!(matches!(
            result,
            Err(IndexingError::SourceError(SourceError::InvalidUrl(_)))
        ));
    }

    #[tokio::test]
    async fn test_invalid_opensearch_url_is_search_error() {
        let result = Dependencies::new(&settings("http://localhost:8082", "not a url")).await;

        assert!(matches!(
            result,
            Err(IndexingError::SearchError(SearchError::ConnectionError(_)))
        ));
    }
}
