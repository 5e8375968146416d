//! In-memory gateways for pipeline tests.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use talks_indexer_repository::{SearchError, SearchIndex};
use talks_indexer_shared::{Conference, Talk};
use talks_indexer_source::{SourceError, TalkSource};

/// Talk source serving fixed conferences and talks.
#[derive(Default)]
pub(crate) struct MockTalkSource {
    pub conferences: Vec<Conference>,
    pub talks: HashMap<String, Vec<Talk>>,
    pub failing_conferences: HashSet<String>,
    pub failing_talks: HashSet<String>,
    pub fail_conference_list: bool,
}

impl MockTalkSource {
    pub fn with_conference(mut self, conference: Conference, talks: Vec<Talk>) -> Self {
        self.talks.insert(conference.id.clone(), talks);
        self.conferences.push(conference);
        self
    }

    pub fn with_failing_conference(mut self, conference: Conference) -> Self {
        self.failing_conferences.insert(conference.id.clone());
        self.conferences.push(conference);
        self
    }

    pub fn with_failing_talk(mut self, talk_id: &str) -> Self {
        self.failing_talks.insert(talk_id.to_string());
        self
    }
}

#[async_trait]
impl TalkSource for MockTalkSource {
    async fn get_conferences(&self) -> Result<Vec<Conference>, SourceError> {
        if self.fail_conference_list {
            return Err(SourceError::status(500, "internal error"));
        }
        Ok(self.conferences.clone())
    }

    async fn get_talks(&self, conference_id: &str) -> Result<Vec<Talk>, SourceError> {
        if self.failing_conferences.contains(conference_id) {
            return Err(SourceError::request("connection reset"));
        }
        Ok(self.talks.get(conference_id).cloned().unwrap_or_default())
    }

    async fn get_talk(&self, talk_id: &str) -> Result<Talk, SourceError> {
        if self.failing_talks.contains(talk_id) {
            return Err(SourceError::status(502, "bad gateway"));
        }
        self.talks
            .values()
            .flatten()
            .find(|talk| talk.id == talk_id)
            .cloned()
            .ok_or_else(|| SourceError::not_found(format!("talk {}", talk_id)))
    }
}

/// Talk source that never answers.
pub(crate) struct PendingTalkSource;

#[async_trait]
impl TalkSource for PendingTalkSource {
    async fn get_conferences(&self) -> Result<Vec<Conference>, SourceError> {
        std::future::pending().await
    }

    async fn get_talks(&self, _conference_id: &str) -> Result<Vec<Talk>, SourceError> {
        std::future::pending().await
    }

    async fn get_talk(&self, _talk_id: &str) -> Result<Talk, SourceError> {
        std::future::pending().await
    }
}

/// A recorded search index call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum IndexCall {
    Delete(String),
    Create(String, Value),
    Exists(String),
    Bulk(String, Vec<Talk>),
}

/// Search index recording every call in order.
#[derive(Default)]
pub(crate) struct MockSearchIndex {
    pub calls: Mutex<Vec<IndexCall>>,
    pub existing: Mutex<HashSet<String>>,
    pub failing_bulk: HashSet<String>,
    pub failing_create: HashSet<String>,
    pub failing_delete: HashSet<String>,
    pub failing_exists: HashSet<String>,
}

impl MockSearchIndex {
    pub fn with_existing(indexes: &[&str]) -> Self {
        Self {
            existing: Mutex::new(indexes.iter().map(|i| i.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn failing_bulk_on(mut self, index: &str) -> Self {
        self.failing_bulk.insert(index.to_string());
        self
    }

    pub fn failing_create_on(mut self, index: &str) -> Self {
        self.failing_create.insert(index.to_string());
        self
    }

    pub fn failing_delete_on(mut self, index: &str) -> Self {
        self.failing_delete.insert(index.to_string());
        self
    }

    pub fn failing_exists_on(mut self, index: &str) -> Self {
        self.failing_exists.insert(index.to_string());
        self
    }

    pub async fn calls(&self) -> Vec<IndexCall> {
        self.calls.lock().await.clone()
    }

    pub async fn bulk_calls(&self) -> Vec<(String, Vec<Talk>)> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|call| match call {
                IndexCall::Bulk(index, talks) => Some((index, talks)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl SearchIndex for MockSearchIndex {
    async fn bulk_index(&self, index: &str, talks: &[Talk]) -> Result<(), SearchError> {
        self.calls
            .lock()
            .await
            .push(IndexCall::Bulk(index.to_string(), talks.to_vec()));
        if self.failing_bulk.contains(index) {
            return Err(SearchError::bulk_index("bulk rejected"));
        }
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchError> {
        self.calls.lock().await.push(IndexCall::Delete(index.to_string()));
        if self.failing_delete.contains(index) {
            return Err(SearchError::index_deletion("cluster_block_exception"));
        }
        self.existing.lock().await.remove(index);
        Ok(())
    }

    async fn create_index(&self, index: &str, mapping: &Value) -> Result<(), SearchError> {
        self.calls
            .lock()
            .await
            .push(IndexCall::Create(index.to_string(), mapping.clone()));
        if self.failing_create.contains(index) {
            return Err(SearchError::index_creation("resource_already_exists_exception"));
        }
        self.existing.lock().await.insert(index.to_string());
        Ok(())
    }

    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        self.calls.lock().await.push(IndexCall::Exists(index.to_string()));
        if self.failing_exists.contains(index) {
            return Err(SearchError::index_exists("status 503"));
        }
        Ok(self.existing.lock().await.contains(index))
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        Ok(true)
    }
}
