//! moresleep implementation of the talk source.

mod client;
mod responses;

pub use client::MoresleepClient;
