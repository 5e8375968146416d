//! Error types for the reindex pipeline.

use std::fmt;

use thiserror::Error;

use talks_indexer_repository::SearchError;
use talks_indexer_source::SourceError;

/// Index lifecycle step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOperation {
    Delete,
    Create,
    CheckExists,
}

impl fmt::Display for IndexOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            IndexOperation::Delete => "delete",
            IndexOperation::Create => "create",
            IndexOperation::CheckExists => "check existence of",
        };
        f.write_str(action)
    }
}

/// Errors that can occur during a reindex operation.
#[derive(Error, Debug)]
pub enum ReindexError {
    #[error("failed to fetch conferences: {0}")]
    FetchConferences(#[source] SourceError),

    #[error("failed to fetch talks for conference {conference}: {source}")]
    FetchTalks {
        conference: String,
        #[source]
        source: SourceError,
    },

    #[error("failed to fetch talk {talk_id}: {source}")]
    FetchTalk {
        talk_id: String,
        #[source]
        source: SourceError,
    },

    #[error("conference not found with slug: {0}")]
    ConferenceNotFound(String),

    #[error("talk not found: {0}")]
    TalkNotFound(String),

    #[error("failed to {operation} index {index}: {source}")]
    IndexLifecycle {
        index: String,
        operation: IndexOperation,
        #[source]
        source: SearchError,
    },

    #[error("failed to index to {index}: {source}")]
    BulkWrite {
        index: String,
        #[source]
        source: SearchError,
    },

    #[error("reindex cancelled")]
    Cancelled,
}

impl ReindexError {
    pub fn fetch_talks(conference: impl Into<String>, source: SourceError) -> Self {
        Self::FetchTalks {
            conference: conference.into(),
            source,
        }
    }

    pub fn fetch_talk(talk_id: impl Into<String>, source: SourceError) -> Self {
        Self::FetchTalk {
            talk_id: talk_id.into(),
            source,
        }
    }

    pub fn index_lifecycle(
        index: impl Into<String>,
        operation: IndexOperation,
        source: SearchError,
    ) -> Self {
        Self::IndexLifecycle {
            index: index.into(),
            operation,
            source,
        }
    }

    pub fn bulk_write(index: impl Into<String>, source: SearchError) -> Self {
        Self::BulkWrite {
            index: index.into(),
            source,
        }
    }

    /// The requested conference or talk does not exist in the source.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ConferenceNotFound(_) | Self::TalkNotFound(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_resource() {
        let err = ReindexError::fetch_talks("conf-1", SourceError::request("connection refused"));
        assert!(err.to_string().starts_with("failed to fetch talks for conference conf-1"));

        let err = ReindexError::index_lifecycle(
            "javazone_private",
            IndexOperation::Create,
            SearchError::index_creation("boom"),
        );
        assert!(err.to_string().starts_with("failed to create index javazone_private"));

        let err = ReindexError::index_lifecycle(
            "javazone_public",
            IndexOperation::CheckExists,
            SearchError::index_exists("boom"),
        );
        assert!(err
            .to_string()
            .starts_with("failed to check existence of index javazone_public"));

        assert_eq!(
            ReindexError::ConferenceNotFound("nope".to_string()).to_string(),
            "conference not found with slug: nope"
        );
    }

    #[test]
    fn test_classification_helpers() {
        assert!(ReindexError::ConferenceNotFound("x".to_string()).is_not_found());
        assert!(ReindexError::TalkNotFound("x".to_string()).is_not_found());
        assert!(!ReindexError::Cancelled.is_not_found());
        assert!(ReindexError::Cancelled.is_cancelled());
        assert!(!ReindexError::FetchConferences(SourceError::parse("bad")).is_cancelled());
    }
}
