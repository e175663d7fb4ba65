//! Local filesystem storage implementation.
//!
//! Writes go to a temporary sibling file which is then renamed over the
//! artifact, so readers never observe a half-written document. Missing parent
//! directories are created.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::RunResult;
use crate::storage::{ResultStorage, WriteMetadata};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage writing to the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

/// Serialize an artifact as two-space indented JSON with a trailing newline.
pub fn render(result: &RunResult) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(result)?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[async_trait]
impl ResultStorage for LocalStorage {
    async fn write_result(&self, result: &RunResult) -> Result<WriteMetadata> {
        let bytes = render(result)?;
        self.write_bytes(&bytes).await?;

        log::info!(
            "Wrote {} URLs ({} bytes) to {}",
            result.urls.len(),
            bytes.len(),
            self.path.display()
        );

        Ok(WriteMetadata {
            location: self.path.clone(),
            url_count: result.urls.len(),
            bytes_written: bytes.len(),
            timestamp: Utc::now(),
        })
    }

    async fn load_result(&self) -> Result<Option<RunResult>> {
        match self.read_bytes().await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}
