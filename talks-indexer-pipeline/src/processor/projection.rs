//! Batch projections of talks into index documents.

use tracing::{debug, instrument};

use talks_indexer_shared::Talk;

/// Private projection of every talk, in input order.
#[instrument(skip(talks), fields(talk_count = talks.len()))]
pub fn private_documents(talks: &[Talk]) -> Vec<Talk> {
    talks.iter().map(Talk::to_private).collect()
}

/// Public projection of the publicly visible talks, in input order.
///
/// Talks that are not approved are left out.
#[instrument(skip(talks), fields(talk_count = talks.len()))]
pub fn public_documents(talks: &[Talk]) -> Vec<Talk> {
    let documents: Vec<Talk> = talks.iter().filter_map(Talk::to_public).collect();

    debug!(
        public_count = documents.len(),
        filtered = talks.len() - documents.len(),
        "Filtered talks for public index"
    );
    documents
}
