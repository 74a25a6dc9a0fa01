// src/models/mod.rs

//! Domain models for the aggregator.

mod config;
mod posting;

// Re-export all public types
pub use config::{AdzunaCredentials, Config, FetcherConfig, OutputConfig, SearchConfig};
pub use posting::Posting;
