//! Run output structures.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Label written to the `source` field of every artifact.
pub const SOURCE_LABEL: &str = "note sitemap";

/// The JSON artifact produced by a successful run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunResult {
    /// ISO 8601 UTC timestamp with a `Z` suffix
    pub generated_at: String,

    /// Where the URLs came from
    pub source: String,

    /// Deduplicated URLs, fresh before stale
    pub urls: Vec<String>,
}

impl RunResult {
    pub fn new(generated_at: DateTime<Utc>, urls: Vec<String>) -> Self {
        Self {
            generated_at: format_generated_at(generated_at),
            source: SOURCE_LABEL.to_string(),
            urls,
        }
    }
}

/// Format a timestamp as ISO 8601 UTC.
///
/// Microseconds are written only when non-zero.
pub fn format_generated_at(at: DateTime<Utc>) -> String {
    let format = if at.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    at.to_rfc3339_opts(format, true)
}

/// Counters collected while walking child sitemaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Child sitemaps chosen by selection
    pub children_selected: usize,
    /// Child sitemaps actually fetched
    pub children_attempted: usize,
    /// Fetches or parses that failed and were skipped
    pub children_failed: usize,
    /// Fresh URLs collected, duplicates included
    pub fresh_found: usize,
    /// Stale URLs collected, duplicates included
    pub stale_found: usize,
    /// Iteration ended before every selected child was visited
    pub stopped_early: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generated_at_whole_seconds() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        assert_eq!(format_generated_at(at), "2026-10-18T09:00:00Z");
    }

    #[test]
    fn test_generated_at_with_micros() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
            + chrono::TimeDelta::microseconds(123_456);
        assert_eq!(format_generated_at(at), "2026-10-18T09:00:00.123456Z");
    }

    #[test]
    fn test_serialized_key_order() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let result = RunResult::new(at, vec!["https://note.com/a/n/n1".to_string()]);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"generated_at":"2026-10-18T09:00:00Z","source":"note sitemap","urls":["https://note.com/a/n/n1"]}"#
        );
    }
}
