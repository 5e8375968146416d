//! # Talks Indexer
//!
//! Main library for the talks indexer.
//!
//! This crate provides the configuration, dependency wiring and command
//! dispatch for running reindex operations from the command line.

pub mod commands;
pub mod config;

pub use commands::{run, Command};
pub use config::{Dependencies, Mode, Settings};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Reindex error.
    #[error("Reindex error: {0}")]
    ReindexError(#[from] talks_indexer_pipeline::ReindexError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] talks_indexer_repository::SearchError),

    /// Talk source error.
    #[error("Source error: {0}")]
    SourceError(#[from] talks_indexer_source::SourceError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
