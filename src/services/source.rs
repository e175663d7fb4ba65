// src/services/source.rs

//! Where sitemap bytes come from.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::FetchConfig;
use crate::utils::http;

/// Trait for sitemap byte sources.
#[async_trait]
pub trait SitemapSource: Send + Sync {
    /// Fetch the raw body stored at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Sitemap source backed by HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source with a client built from the fetch settings.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config)?,
        })
    }
}

#[async_trait]
impl SitemapSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("GET {}", url);
        http::fetch_bytes(&self.client, url).await
    }
}
