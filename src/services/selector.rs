// src/services/selector.rs

//! Child sitemap selection.
//!
//! Recently modified child sitemaps are more likely to hold fresh notes, so
//! the index is ranked by `lastmod` and a seeded random subset is drawn from
//! the top of the ranking. The pool is twice the number of children wanted.

use crate::models::SitemapIndexEntry;
use crate::utils::seeded_shuffle;

/// Rank index entries newest first.
///
/// The sort is stable, and entries without a timestamp follow every timed
/// entry in their original order.
pub fn order_by_recency(entries: &[SitemapIndexEntry]) -> Vec<&SitemapIndexEntry> {
    let (mut timed, untimed): (Vec<_>, Vec<_>) =
        entries.iter().partition(|entry| entry.lastmod.is_some());

    timed.sort_by(|a, b| b.lastmod.cmp(&a.lastmod));
    timed.extend(untimed);
    timed
}

/// Choose up to `max_children` child sitemap locations to inspect.
///
/// The same entries, `max_children` and `seed` always produce the same list.
pub fn select_children(
    entries: &[SitemapIndexEntry],
    max_children: usize,
    seed: u64,
) -> Vec<String> {
    let mut pool = order_by_recency(entries);
    pool.truncate(max_children.saturating_mul(2));

    seeded_shuffle(&mut pool, seed);

    pool.into_iter()
        .take(max_children)
        .map(|entry| entry.loc.clone())
        .collect()
}
