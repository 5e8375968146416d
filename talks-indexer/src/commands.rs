//! Reindex commands exposed by the binary.

use clap::Subcommand;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::IndexingError;
use talks_indexer_pipeline::{Indexer, ReindexSummary};

/// A reindex operation selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Rebuild both indexes from every conference
    All,
    /// Reindex the talks of one conference
    Conference {
        /// Conference slug, e.g. javazone2024
        slug: String,
    },
    /// Reindex a single talk
    Talk {
        /// Talk id
        id: String,
    },
}

/// Run `command` against `indexer` until it completes or `cancel` fires.
pub async fn run(
    indexer: &dyn Indexer,
    command: &Command,
    cancel: &CancellationToken,
) -> Result<ReindexSummary, IndexingError> {
    let summary = match command {
        Command::All => indexer.reindex_all(cancel).await?,
        Command::Conference { slug } => indexer.reindex_conference(slug, cancel).await?,
        Command::Talk { id } => indexer.reindex_talk(id, cancel).await?,
    };

    info!(
        command = ?command,
        private_count = summary.private_count,
        public_count = summary.public_count,
        skipped_conferences = summary.skipped_conferences,
        "Reindex finished"
    );
    Ok(summary)
}
