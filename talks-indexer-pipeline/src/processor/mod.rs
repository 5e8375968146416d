//! Processor module for the reindex pipeline.
//!
//! Derives the documents written to the private and public indexes.

mod projection;

pub use projection::{private_documents, public_documents};
