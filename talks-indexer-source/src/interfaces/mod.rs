//! Interface definitions for the talk source.

mod talk_source;

pub use talk_source::TalkSource;
