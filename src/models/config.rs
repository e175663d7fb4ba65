//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and sitemap source settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Selection and bounding rules
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Artifact destination
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Config file read from the working directory when none is given.
    pub const DEFAULT_FILE: &'static str = "note-sampler.toml";

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Config load failed from {:?}: {}. Using defaults.", path, e);
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }

        let index_url = Url::parse(&self.fetch.index_url)?;
        if !matches!(index_url.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "fetch.index_url must be http(s), got {}",
                index_url.scheme()
            )));
        }

        if self.sampling.max_children == 0 {
            return Err(AppError::validation("sampling.max_children must be > 0"));
        }
        if self.sampling.max_urls == 0 {
            return Err(AppError::validation("sampling.max_urls must be > 0"));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(AppError::validation("output.path is empty"));
        }
        Ok(())
    }
}

/// HTTP client and sitemap source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Location of the top-level sitemap index
    #[serde(default = "defaults::index_url")]
    pub index_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl FetchConfig {
    pub const DEFAULT_INDEX_URL: &'static str = "https://note.com/sitemap.xml.gz";
    pub const DEFAULT_USER_AGENT: &'static str = "random_note_url_builder/1.0";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            index_url: defaults::index_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Child selection, freshness, and output bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Maximum number of child sitemaps to inspect
    #[serde(default = "defaults::max_children")]
    pub max_children: usize,

    /// Maximum number of URLs in the artifact
    #[serde(default = "defaults::max_urls")]
    pub max_urls: usize,

    /// Distinct fresh URLs that end child iteration early
    #[serde(default = "defaults::min_urls")]
    pub min_urls: usize,

    /// Recency window for fresh URLs, in hours
    #[serde(default = "defaults::within_hours")]
    pub within_hours: u32,

    /// Seed for the child sitemap shuffle
    #[serde(default = "defaults::seed")]
    pub seed: u64,
}

impl SamplingConfig {
    pub const DEFAULT_MAX_CHILDREN: usize = 30;
    pub const DEFAULT_MAX_URLS: usize = 5000;
    pub const DEFAULT_MIN_URLS: usize = 300;
    pub const DEFAULT_WITHIN_HOURS: u32 = 100;
    pub const DEFAULT_SEED: u64 = 42;
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_children: defaults::max_children(),
            max_urls: defaults::max_urls(),
            min_urls: defaults::min_urls(),
            within_hours: defaults::within_hours(),
            seed: defaults::seed(),
        }
    }
}

/// Artifact output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON artifact
    #[serde(default = "defaults::output_path")]
    pub path: PathBuf,
}

impl OutputConfig {
    pub const DEFAULT_PATH: &'static str = "public/urls.json";
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: defaults::output_path(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    use super::{FetchConfig, OutputConfig, SamplingConfig};

    // Fetch defaults
    pub fn index_url() -> String {
        FetchConfig::DEFAULT_INDEX_URL.into()
    }
    pub fn user_agent() -> String {
        FetchConfig::DEFAULT_USER_AGENT.into()
    }
    pub fn timeout() -> u64 {
        FetchConfig::DEFAULT_TIMEOUT_SECS
    }

    // Sampling defaults
    pub fn max_children() -> usize {
        SamplingConfig::DEFAULT_MAX_CHILDREN
    }
    pub fn max_urls() -> usize {
        SamplingConfig::DEFAULT_MAX_URLS
    }
    pub fn min_urls() -> usize {
        SamplingConfig::DEFAULT_MIN_URLS
    }
    pub fn within_hours() -> u32 {
        SamplingConfig::DEFAULT_WITHIN_HOURS
    }
    pub fn seed() -> u64 {
        SamplingConfig::DEFAULT_SEED
    }

    // Output defaults
    pub fn output_path() -> PathBuf {
        PathBuf::from(OutputConfig::DEFAULT_PATH)
    }
}
