//! Orchestrator module for the reindex pipeline.
//!
//! Coordinates the talk source, the processor and the loader for the three
//! reindex operations.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::cancellation::until_cancelled;
use crate::errors::ReindexError;
use crate::loader::{IndexSettings, SearchLoader};
use talks_indexer_repository::SearchIndex;
use talks_indexer_shared::Talk;
use talks_indexer_source::TalkSource;

/// Outcome of a successful reindex operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReindexSummary {
    /// Documents written to the private index.
    pub private_count: usize,
    /// Documents written to the public index.
    pub public_count: usize,
    /// Conferences whose talks could not be fetched during a full reindex.
    pub skipped_conferences: usize,
}

/// The reindex operations.
///
/// Every operation is idempotent and may be retried. Cancelling the token
/// aborts the in-flight call and yields [`ReindexError::Cancelled`]; writes
/// already performed are kept.
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Rebuild both indexes from scratch with the talks of every conference.
    async fn reindex_all(&self, cancel: &CancellationToken) -> Result<ReindexSummary, ReindexError>;

    /// Reindex the talks of the conference with the given slug.
    async fn reindex_conference(
        &self,
        slug: &str,
        cancel: &CancellationToken,
    ) -> Result<ReindexSummary, ReindexError>;

    /// Reindex a single talk.
    async fn reindex_talk(
        &self,
        talk_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ReindexSummary, ReindexError>;
}

/// Reindexer syncing talks from the talk source into the search indexes.
///
/// Stateless apart from its settings and gateway handles, so one instance can
/// be shared between tasks.
pub struct Reindexer {
    source: Arc<dyn TalkSource>,
    loader: SearchLoader,
}

impl Reindexer {
    pub fn new(
        source: Arc<dyn TalkSource>,
        index: Arc<dyn SearchIndex>,
        settings: IndexSettings,
    ) -> Self {
        Self {
            source,
            loader: SearchLoader::new(index, settings),
        }
    }

    /// Private write first; a failure there means the public write is never
    /// attempted.
    async fn write_both(
        &self,
        talks: &[Talk],
        cancel: &CancellationToken,
    ) -> Result<ReindexSummary, ReindexError> {
        let private_count = self.loader.write_private(talks, cancel).await?;
        let public_count = self.loader.write_public(talks, cancel).await?;

        Ok(ReindexSummary {
            private_count,
            public_count,
            skipped_conferences: 0,
        })
    }
}

#[async_trait]
impl Indexer for Reindexer {
    #[instrument(skip(self, cancel))]
    async fn reindex_all(&self, cancel: &CancellationToken) -> Result<ReindexSummary, ReindexError> {
        info!("Starting full reindex");

        let conferences = until_cancelled(cancel, self.source.get_conferences())
            .await?
            .map_err(ReindexError::FetchConferences)?;

        info!(count = conferences.len(), "Found conferences");

        self.loader.recreate_indexes(cancel).await?;

        let mut all_talks = Vec::new();
        let mut skipped_conferences = 0;

        for conference in &conferences {
            match until_cancelled(cancel, self.source.get_talks(&conference.id)).await? {
                Ok(talks) => {
                    info!(
                        conference_id = %conference.id,
                        conference_name = %conference.name,
                        count = talks.len(),
                        "Fetched talks for conference"
                    );
                    all_talks.extend(talks);
                }
                Err(e) => {
                    error!(
                        conference_id = %conference.id,
                        conference_name = %conference.name,
                        error = %e,
                        "Failed to fetch talks for conference, skipping"
                    );
                    skipped_conferences += 1;
                }
            }
        }

        if all_talks.is_empty() {
            warn!("No talks found to index");
            return Ok(ReindexSummary {
                skipped_conferences,
                ..Default::default()
            });
        }

        let summary = ReindexSummary {
            skipped_conferences,
            ..self.write_both(&all_talks, cancel).await?
        };

        info!(
            total_talks = all_talks.len(),
            private_count = summary.private_count,
            public_count = summary.public_count,
            skipped_conferences = summary.skipped_conferences,
            "Full reindex completed"
        );
        Ok(summary)
    }

    #[instrument(skip(self, cancel))]
    async fn reindex_conference(
        &self,
        slug: &str,
        cancel: &CancellationToken,
    ) -> Result<ReindexSummary, ReindexError> {
        info!(slug = %slug, "Starting conference reindex");

        let conferences = until_cancelled(cancel, self.source.get_conferences())
            .await?
            .map_err(ReindexError::FetchConferences)?;

        let conference = conferences
            .into_iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| ReindexError::ConferenceNotFound(slug.to_string()))?;

        let talks = until_cancelled(cancel, self.source.get_talks(&conference.id))
            .await?
            .map_err(|e| ReindexError::fetch_talks(slug, e))?;

        self.loader.ensure_indexes(cancel).await?;

        let summary = self.write_both(&talks, cancel).await?;

        info!(
            slug = %slug,
            conference_id = %conference.id,
            private_count = summary.private_count,
            public_count = summary.public_count,
            "Conference reindex completed"
        );
        Ok(summary)
    }

    #[instrument(skip(self, cancel))]
    async fn reindex_talk(
        &self,
        talk_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ReindexSummary, ReindexError> {
        info!(talk_id = %talk_id, "Starting talk reindex");

        let talk = until_cancelled(cancel, self.source.get_talk(talk_id))
            .await?
            .map_err(|e| {
                if e.is_not_found() {
                    ReindexError::TalkNotFound(talk_id.to_string())
                } else {
                    ReindexError::fetch_talk(talk_id, e)
                }
            })?;

        self.loader.ensure_indexes(cancel).await?;

        let talks = std::slice::from_ref(&talk);
        let private_count = self.loader.write_private(talks, cancel).await?;

        // A talk that is no longer public keeps any earlier public document.
        let public_count = if talk.is_public() {
            self.loader.write_public(talks, cancel).await?
        } else {
            0
        };

        info!(
            talk_id = %talk_id,
            status = %talk.status,
            indexed_to_public = public_count > 0,
            "Talk reindex completed"
        );
        Ok(ReindexSummary {
            private_count,
            public_count,
            skipped_conferences: 0,
        })
    }
}
