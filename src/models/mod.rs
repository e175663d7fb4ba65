// src/models/mod.rs

//! Domain models for the sampler.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod output;
mod sitemap;

// Re-export all public types
pub use config::{Config, FetchConfig, OutputConfig, SamplingConfig};
pub use output::{RunResult, RunStats, SOURCE_LABEL, format_generated_at};
pub use sitemap::{CONTENT_PATH_MARKER, SitemapIndexEntry, SitemapNode, UrlBuckets};
