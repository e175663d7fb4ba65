//! Sitemap data structures.

use chrono::{DateTime, Utc};

/// Path segment that marks a note content page.
pub const CONTENT_PATH_MARKER: &str = "/n/";

/// A `<sitemap>` or `<url>` node as read from sitemap XML.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SitemapNode {
    /// Trimmed `<loc>` text, if present
    pub loc: Option<String>,

    /// Parsed `<lastmod>`, absent when missing or unparseable
    pub lastmod: Option<DateTime<Utc>>,
}

impl SitemapNode {
    pub fn new(loc: impl Into<String>, lastmod: Option<DateTime<Utc>>) -> Self {
        Self {
            loc: Some(loc.into()),
            lastmod,
        }
    }

    /// Non-empty location, if any.
    pub fn location(&self) -> Option<&str> {
        self.loc.as_deref().filter(|loc| !loc.is_empty())
    }

    /// Whether the location follows the note content path convention.
    pub fn is_content_page(&self) -> bool {
        self.location()
            .is_some_and(|loc| loc.contains(CONTENT_PATH_MARKER))
    }
}

/// A child sitemap listed in the sitemap index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapIndexEntry {
    /// Location of the child sitemap
    pub loc: String,

    /// When the child sitemap last changed
    pub lastmod: Option<DateTime<Utc>>,
}

impl SitemapIndexEntry {
    pub fn new(loc: impl Into<String>, lastmod: Option<DateTime<Utc>>) -> Self {
        Self {
            loc: loc.into(),
            lastmod,
        }
    }

    /// Convert a parsed node, dropping nodes without a location.
    pub fn from_node(node: SitemapNode) -> Option<Self> {
        let lastmod = node.lastmod;
        node.loc
            .filter(|loc| !loc.is_empty())
            .map(|loc| Self { loc, lastmod })
    }
}

/// Candidate URLs from one child sitemap, split by recency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlBuckets {
    /// Modified within the recency window
    pub fresh: Vec<String>,

    /// Older than the window or without a timestamp
    pub stale: Vec<String>,
}

impl UrlBuckets {
    pub fn len(&self) -> usize {
        self.fresh.len() + self.stale.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fresh.is_empty() && self.stale.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_page_marker() {
        assert!(SitemapNode::new("https://note.com/alice/n/n1a2b3c", None).is_content_page());
        assert!(!SitemapNode::new("https://note.com/about", None).is_content_page());
        assert!(!SitemapNode::default().is_content_page());
    }

    #[test]
    fn test_empty_location_is_absent() {
        let node = SitemapNode::new("", None);
        assert_eq!(node.location(), None);
        assert!(SitemapIndexEntry::from_node(node).is_none());
    }

    #[test]
    fn test_bucket_counts() {
        let mut buckets = UrlBuckets::default();
        assert!(buckets.is_empty());

        buckets.stale.push("https://note.com/a/n/old".to_string());
        assert!(!buckets.is_empty());
        buckets.fresh.push("https://note.com/a/n/new".to_string());
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn test_index_entry_from_node() {
        let node = SitemapNode::new("https://note.com/sitemap/notes-1.xml.gz", None);
        let entry = SitemapIndexEntry::from_node(node).unwrap();
        assert_eq!(entry.loc, "https://note.com/sitemap/notes-1.xml.gz");
        assert!(entry.lastmod.is_none());
    }
}
