//! # Talks Indexer Source
//!
//! This crate provides the read-only talk source used by the reindex
//! orchestrator, and a concrete implementation for the moresleep
//! talk-submission API.
//!
//! The source supplies three things: the list of conferences, the talks of
//! one conference, and a single talk by id.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod moresleep;

pub use config::MoresleepConfig;
pub use errors::SourceError;
pub use interfaces::TalkSource;
pub use moresleep::MoresleepClient;
