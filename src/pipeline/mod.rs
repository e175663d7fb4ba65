//! Pipeline entry points for sampler operations.
//!
//! - `build_urls`: Select child sitemaps and collect a bounded URL list
//! - `run_sampler`: Build the list and write it to storage

pub mod build;
pub mod sample;

pub use build::build_urls;
pub use sample::run_sampler;
