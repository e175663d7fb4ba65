// src/services/extractor.rs

//! Splits a child sitemap's note URLs into fresh and stale buckets.

use chrono::{DateTime, TimeDelta, Utc};

use crate::models::{SitemapNode, UrlBuckets};

/// Partition note URLs by how recently they changed.
///
/// Nodes without a location or outside the note path convention are
/// dropped. A URL is fresh when `now - lastmod <= within_hours`; URLs with no
/// timestamp are stale. Both buckets keep document order and may repeat.
pub fn extract(nodes: &[SitemapNode], now: DateTime<Utc>, within_hours: u32) -> UrlBuckets {
    let window = TimeDelta::hours(i64::from(within_hours));
    let mut buckets = UrlBuckets::default();

    for node in nodes.iter().filter(|node| node.is_content_page()) {
        let Some(loc) = node.location() else {
            continue;
        };

        match node.lastmod {
            Some(lastmod) if now - lastmod <= window => buckets.fresh.push(loc.to_string()),
            _ => buckets.stale.push(loc.to_string()),
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn hours_ago(hours: i64) -> Option<DateTime<Utc>> {
        Some(now() - TimeDelta::hours(hours))
    }

    #[test]
    fn test_filters_non_note_urls() {
        let nodes = vec![
            SitemapNode::new("https://note.com/about", hours_ago(1)),
            SitemapNode::new("https://note.com/alice/n/n1", hours_ago(1)),
            SitemapNode::default(),
            SitemapNode::new("", None),
        ];

        let buckets = extract(&nodes, now(), 100);
        assert_eq!(buckets.fresh, vec!["https://note.com/alice/n/n1"]);
        assert!(buckets.stale.is_empty());
    }

    #[test]
    fn test_window_is_inclusive() {
        let just_outside = now() - TimeDelta::hours(100) - TimeDelta::seconds(1);
        let nodes = vec![
            SitemapNode::new("https://note.com/a/n/edge", hours_ago(100)),
            SitemapNode::new("https://note.com/a/n/old", Some(just_outside)),
        ];

        let buckets = extract(&nodes, now(), 100);
        assert_eq!(buckets.fresh, vec!["https://note.com/a/n/edge"]);
        assert_eq!(buckets.stale, vec!["https://note.com/a/n/old"]);
    }

    #[test]
    fn test_missing_timestamp_is_stale() {
        let nodes = vec![SitemapNode::new("https://note.com/a/n/untimed", None)];
        let buckets = extract(&nodes, now(), 100);
        assert!(buckets.fresh.is_empty());
        assert_eq!(buckets.stale, vec!["https://note.com/a/n/untimed"]);
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        let nodes = vec![SitemapNode::new("https://note.com/a/n/future", hours_ago(-2))];
        let buckets = extract(&nodes, now(), 100);
        assert_eq!(buckets.fresh.len(), 1);
    }

    #[test]
    fn test_keeps_order_and_duplicates() {
        let nodes = vec![
            SitemapNode::new("https://note.com/a/n/3", hours_ago(3)),
            SitemapNode::new("https://note.com/a/n/old1", hours_ago(500)),
            SitemapNode::new("https://note.com/a/n/1", hours_ago(1)),
            SitemapNode::new("https://note.com/a/n/3", hours_ago(3)),
            SitemapNode::new("https://note.com/a/n/old2", None),
        ];

        let buckets = extract(&nodes, now(), 100);
        assert_eq!(
            buckets.fresh,
            vec![
                "https://note.com/a/n/3",
                "https://note.com/a/n/1",
                "https://note.com/a/n/3"
            ]
        );
        assert_eq!(
            buckets.stale,
            vec!["https://note.com/a/n/old1", "https://note.com/a/n/old2"]
        );
        assert_eq!(buckets.len(), 5);
    }
}
