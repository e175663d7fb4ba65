// src/error.rs

//! Unified error handling for the sampler.

use std::fmt;

use thiserror::Error;

/// Result type alias for sampler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Sitemap XML could not be read
    #[error("XML error: {0}")]
    Xml(String),

    /// Fetching a sitemap failed
    #[error("Fetch error for {context}: {message}")]
    Fetch { context: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The sitemap index listed no child sitemaps
    #[error("No child sitemaps found in sitemap index")]
    EmptyIndex,

    /// Selection produced no child sitemaps to inspect
    #[error("No child sitemaps selected from sitemap index")]
    NoChildrenSelected,

    /// No URL survived filtering across all inspected children
    #[error("No candidate URLs could be generated")]
    NoCandidates,
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an XML error.
    pub fn xml(message: impl fmt::Display) -> Self {
        Self::Xml(message.to_string())
    }

    /// Create a fetch error with context.
    pub fn fetch(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error ends a run because the result would be empty.
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            Self::EmptyIndex | Self::NoChildrenSelected | Self::NoCandidates
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_variants() {
        assert!(AppError::EmptyIndex.is_empty_result());
        assert!(AppError::NoChildrenSelected.is_empty_result());
        assert!(AppError::NoCandidates.is_empty_result());
        assert!(!AppError::xml("bad").is_empty_result());
    }

    #[test]
    fn test_fetch_error_message() {
        let err = AppError::fetch("https://note.com/sitemap.xml.gz", "HTTP status 404");
        assert_eq!(
            err.to_string(),
            "Fetch error for https://note.com/sitemap.xml.gz: HTTP status 404"
        );
    }
}
