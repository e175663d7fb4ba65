//! Storage abstractions for the URL list artifact.
//!
//! The artifact is a single JSON document:
//!
//! ```text
//! {
//!   "generated_at": "2026-10-18T09:00:00Z",
//!   "source": "note sitemap",
//!   "urls": ["https://note.com/.../n/...", ...]
//! }
//! ```

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::RunResult;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Where the artifact was written
    pub location: PathBuf,
    /// Number of URLs written
    pub url_count: usize,
    /// Size of the serialized artifact in bytes
    pub bytes_written: usize,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for artifact storage backends.
#[async_trait]
pub trait ResultStorage: Send + Sync {
    /// Replace the stored artifact with `result`.
    async fn write_result(&self, result: &RunResult) -> Result<WriteMetadata>;

    /// Load the stored artifact, if one exists.
    async fn load_result(&self) -> Result<Option<RunResult>>;
}
