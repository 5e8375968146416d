//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndex`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    params::Refresh,
    BulkParts, OpenSearch,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::OpenSearchConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchIndex;
use talks_indexer_shared::Talk;

/// OpenSearch client implementation.
///
/// Serves both talk indexes; the target index is passed to every call.
///
/// # Example
///
/// ```ignore
/// use talks_indexer_repository::{OpenSearchClient, OpenSearchConfig, SearchIndex};
/// use talks_indexer_repository::opensearch::talk_public_index_mapping;
///
/// let client = OpenSearchClient::new(&OpenSearchConfig::new("http://localhost:9200")).await?;
/// if !client.index_exists("javazone_public").await? {
///     client.create_index("javazone_public", &talk_public_index_mapping()).await?;
/// }
/// client.bulk_index("javazone_public", &talks).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the configured URL.
    ///
    /// # Arguments
    ///
    /// * `config` - Node URL and optional basic auth credentials
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If connection setup fails
    pub async fn new(config: &OpenSearchConfig) -> Result<Self, SearchError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some((user, password)) = config.credentials() {
            builder = builder.auth(Credentials::Basic(user.to_string(), password.to_string()));
        }
        let transport = builder
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %config.url,
            authenticated = config.credentials().is_some(),
            "Created OpenSearch client"
        );

        Ok(Self { client })
    }

    /// Build the newline-delimited bulk body: an `index` action followed by
    /// the document, for every talk.
    fn bulk_operations(index: &str, talks: &[Talk]) -> Result<Vec<Value>, SearchError> {
        let mut body = Vec::with_capacity(talks.len() * 2);

        for talk in talks {
            body.push(json!({ "index": { "_index": index, "_id": talk.id } }));
            let document = serde_json::to_value(talk).map_err(|e| {
                SearchError::serialization(format!("failed to serialize talk {}: {}", talk.id, e))
            })?;
            body.push(document);
        }

        Ok(body)
    }

    /// Collect a description of every failed item in a bulk response.
    fn bulk_item_errors(response: &Value) -> Vec<String> {
        let Some(items) = response.get("items").and_then(Value::as_array) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(Value::as_object)
            .flat_map(|item| item.iter())
            .filter(|(_, details)| details.get("status").and_then(Value::as_u64).unwrap_or(0) >= 400)
            .map(|(action, details)| {
                let error = &details["error"];
                format!(
                    "{} failed for doc {} (status {}): {} - {}",
                    action,
                    details["_id"].as_str().unwrap_or_default(),
                    details["status"],
                    error["type"].as_str().unwrap_or_default(),
                    error["reason"].as_str().unwrap_or_default(),
                )
            })
            .collect()
    }
}

#[async_trait]
impl SearchIndex for OpenSearchClient {
    /// Index every talk with its id as the document id and refresh the index
    /// so the documents are immediately searchable.
    ///
    /// A response flagged with `errors: true` fails the whole batch, even if
    /// some documents were written.
    #[instrument(skip(self, talks), fields(count = talks.len()))]
    async fn bulk_index(&self, index: &str, talks: &[Talk]) -> Result<(), SearchError> {
        if talks.is_empty() {
            info!(index = %index, "No talks to index");
            return Ok(());
        }

        let body: Vec<JsonBody<Value>> = Self::bulk_operations(index, talks)?
            .into_iter()
            .map(Into::into)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .refresh(Refresh::True)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                SearchError::bulk_index(format!("failed to execute bulk request on {}: {}", index, e))
            })?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchError::bulk_index(format!(
                "bulk index on {} failed with status {}: {}",
                index, status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(format!("failed to parse bulk response: {}", e)))?;

        if response_body["errors"].as_bool().unwrap_or(false) {
            let details = Self::bulk_item_errors(&response_body);
            error!(index = %index, failed = details.len(), "Bulk index had errors");
            return Err(SearchError::bulk_index(format!(
                "bulk index on {} had errors: {}",
                index,
                details.join("; ")
            )));
        }

        info!(index = %index, count = talks.len(), "Bulk indexed talks");
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::index_deletion(format!("failed to delete index {}: {}", index, e)))?;

        let status = response.status_code();

        // 404 is acceptable - index already doesn't exist
        if status.as_u16() == 404 {
            info!(index = %index, "Index does not exist (already deleted)");
            return Ok(());
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Delete index failed");
            return Err(SearchError::index_deletion(format!(
                "delete index {} failed with status {}: {}",
                index, status, error_body
            )));
        }

        info!(index = %index, "Deleted index");
        Ok(())
    }

    async fn create_index(&self, index: &str, mapping: &Value) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(mapping.clone())
            .send()
            .await
            .map_err(|e| SearchError::index_creation(format!("failed to create index {}: {}", index, e)))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Create index failed");
            return Err(SearchError::index_creation(format!(
                "create index {} failed with status {}: {}",
                index, status, error_body
            )));
        }

        info!(index = %index, "Created index");
        Ok(())
    }

    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| {
                SearchError::index_exists(format!("failed to check if index {} exists: {}", index, e))
            })?;

        match response.status_code().as_u16() {
            200 => {
                debug!(index = %index, "Index exists");
                Ok(true)
            }
            404 => {
                debug!(index = %index, "Index does not exist");
                Ok(false)
            }
            status => {
                let error_body = response.text().await.unwrap_or_default();
                Err(SearchError::index_exists(format!(
                    "index exists check for {} failed with status {}: {}",
                    index, status, error_body
                )))
            }
        }
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::health(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(format!("failed to parse health response: {}", e)))?;

        let cluster_status = body["status"].as_str().unwrap_or("red");
        debug!(status = %cluster_status, "Cluster health");
        Ok(cluster_status != "red")
    }
}
