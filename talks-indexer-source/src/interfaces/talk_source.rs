//! Talk source trait definition.

use async_trait::async_trait;

use crate::errors::SourceError;
use talks_indexer_shared::{Conference, Talk};

/// Read-only access to conferences and their talks.
///
/// The source is the single source of truth on every call; implementations
/// do not cache. Implementations can be swapped for test doubles.
#[async_trait]
pub trait TalkSource: Send + Sync {
    /// Retrieve all available conferences.
    async fn get_conferences(&self) -> Result<Vec<Conference>, SourceError>;

    /// Retrieve all talks of one conference.
    ///
    /// # Arguments
    ///
    /// * `conference_id` - The conference's source identifier
    async fn get_talks(&self, conference_id: &str) -> Result<Vec<Talk>, SourceError>;

    /// Retrieve a single talk by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Talk)` - The talk
    /// * `Err(SourceError)` - [`SourceError::is_not_found`] is true if the
    ///   talk does not exist
    async fn get_talk(&self, talk_id: &str) -> Result<Talk, SourceError>;
}
