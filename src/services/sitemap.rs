// src/services/sitemap.rs

//! Sitemap decoding and parsing.
//!
//! Bodies starting with the gzip magic number are inflated first. Only
//! elements in the sitemap protocol namespace are read: `<sitemap>` nodes
//! under a `<sitemapindex>` root and `<url>` nodes under a `<urlset>` root,
//! each with a `<loc>` and an optional `<lastmod>`.

use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use flate2::read::MultiGzDecoder;
use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};

use crate::error::{AppError, Result};
use crate::models::{SitemapIndexEntry, SitemapNode};
use crate::services::SitemapSource;

/// XML namespace of the sitemap protocol.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

// Depths of the elements we read, counting the root as 1.
const ENTRY_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

/// Fetch, decode, and parse the sitemap index at `url`.
pub async fn load_index(source: &dyn SitemapSource, url: &str) -> Result<Vec<SitemapIndexEntry>> {
    let body = decode_body(source.fetch(url).await?)?;
    parse_index(&body)
}

/// Fetch, decode, and parse the child sitemap at `url`.
pub async fn load_child(source: &dyn SitemapSource, url: &str) -> Result<Vec<SitemapNode>> {
    let body = decode_body(source.fetch(url).await?)?;
    parse_urlset(&body)
}

/// Inflate gzip bodies; anything else passes through unchanged.
pub fn decode_body(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }

    let mut inflated = Vec::with_capacity(bytes.len() * 4);
    MultiGzDecoder::new(bytes.as_slice()).read_to_end(&mut inflated)?;
    Ok(inflated)
}

/// Parse the `<sitemap>` entries of a sitemap index.
///
/// Entries without a location are dropped.
pub fn parse_index(xml: &[u8]) -> Result<Vec<SitemapIndexEntry>> {
    Ok(parse_nodes(xml, "sitemap")?
        .into_iter()
        .filter_map(SitemapIndexEntry::from_node)
        .collect())
}

/// Parse the `<url>` entries of a child sitemap, in document order.
pub fn parse_urlset(xml: &[u8]) -> Result<Vec<SitemapNode>> {
    parse_nodes(xml, "url")
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Loc,
    Lastmod,
}

#[derive(Debug, Default)]
struct PendingNode {
    loc: Option<String>,
    lastmod: Option<String>,
}

impl PendingNode {
    fn set(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::Loc => &mut self.loc,
            Field::Lastmod => &mut self.lastmod,
        };
        // First occurrence wins.
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    fn finish(self) -> SitemapNode {
        SitemapNode {
            loc: self.loc,
            lastmod: self.lastmod.as_deref().and_then(parse_lastmod),
        }
    }
}

fn parse_nodes(xml: &[u8], entry_tag: &str) -> Result<Vec<SitemapNode>> {
    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut nodes = Vec::new();
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut root_seen = false;
    let mut pending: Option<PendingNode> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        buf.clear();
        let (resolved, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(AppError::xml)?;
        let in_namespace = matches!(
            resolved,
            ResolveResult::Bound(Namespace(ns)) if ns == SITEMAP_NAMESPACE.as_bytes()
        );

        match event {
            Event::Start(e) => {
                if depth == 0 {
                    open_root(&mut root_seen)?;
                }
                depth += 1;
                let local = e.local_name();
                if depth == ENTRY_DEPTH && in_namespace && local.as_ref() == entry_tag.as_bytes() {
                    pending = Some(PendingNode::default());
                } else if depth == FIELD_DEPTH && in_namespace && pending.is_some() {
                    field = match local.as_ref() {
                        b"loc" => Some(Field::Loc),
                        b"lastmod" => Some(Field::Lastmod),
                        _ => None,
                    };
                    text.clear();
                }
            }
            Event::Empty(e) => {
                if depth == 0 {
                    open_root(&mut root_seen)?;
                } else if depth + 1 == ENTRY_DEPTH
                    && in_namespace
                    && e.local_name().as_ref() == entry_tag.as_bytes()
                {
                    nodes.push(SitemapNode::default());
                }
            }
            Event::Text(e) if depth == FIELD_DEPTH && field.is_some() => {
                text.push_str(&e.unescape().map_err(AppError::xml)?);
            }
            Event::CData(e) if depth == FIELD_DEPTH && field.is_some() => {
                text.push_str(&String::from_utf8_lossy(&e));
            }
            Event::Text(e) if depth == 0 && e.iter().any(|b| !b.is_ascii_whitespace()) => {
                return Err(AppError::xml("text outside the root element"));
            }
            Event::End(_) => {
                if depth == FIELD_DEPTH {
                    if let (Some(f), Some(node)) = (field.take(), pending.as_mut()) {
                        node.set(f, text.trim());
                    }
                } else if depth == ENTRY_DEPTH {
                    if let Some(node) = pending.take() {
                        nodes.push(node.finish());
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof if !root_seen => {
                return Err(AppError::xml("document has no root element"));
            }
            Event::Eof if depth > 0 => {
                return Err(AppError::xml(format!(
                    "unexpected end of document with {} element(s) open",
                    depth
                )));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(nodes)
}

fn open_root(root_seen: &mut bool) -> Result<()> {
    if *root_seen {
        return Err(AppError::xml("content after the root element"));
    }
    *root_seen = true;
    Ok(())
}

/// Parse a `<lastmod>` value as ISO 8601.
///
/// Accepts RFC 3339 (`Z` or `+hh:mm`), compact offsets, fractional
/// seconds, and naive date-times or bare dates, which are read as UTC.
/// Anything else yields `None`.
pub fn parse_lastmod(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    log::debug!("Unparseable lastmod {:?}, treating as absent", value);
    None
}
