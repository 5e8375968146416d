//! Error types for the talks indexer repository.

mod search_error;

pub use search_error::SearchError;
