// src/pipeline/build.rs

//! URL list building pipeline.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{Config, RunResult, RunStats, UrlBuckets};
use crate::services::{SitemapSource, extract, select_children, sitemap};
use crate::utils::{Clock, dedup_bounded};

/// Build the bounded, deduplicated URL list.
///
/// Children are visited one at a time in selection order. A child that fails
/// to fetch or parse is skipped. Iteration stops once the fresh bucket holds
/// `min_urls` distinct URLs. Fresh URLs precede stale ones in the result.
pub async fn build_urls(
    config: &Config,
    source: &dyn SitemapSource,
    clock: &dyn Clock,
) -> Result<RunResult> {
    let sampling = &config.sampling;
    let now = clock.now();

    let index = sitemap::load_index(source, &config.fetch.index_url).await?;
    if index.is_empty() {
        return Err(AppError::EmptyIndex);
    }
    log::info!("Sitemap index lists {} child sitemaps", index.len());

    let children = select_children(&index, sampling.max_children, sampling.seed);
    if children.is_empty() {
        return Err(AppError::NoChildrenSelected);
    }

    let mut stats = RunStats {
        children_selected: children.len(),
        ..RunStats::default()
    };
    let mut fresh_all = Vec::new();
    let mut stale_all = Vec::new();
    let mut distinct_fresh = HashSet::new();

    for (position, child) in children.iter().enumerate() {
        stats.children_attempted += 1;

        let buckets = match fetch_child(source, child, now, sampling.within_hours).await {
            Ok(buckets) => buckets,
            Err(error) => {
                stats.children_failed += 1;
                log::warn!("Skipping child sitemap {}: {}", child, error);
                continue;
            }
        };

        if buckets.is_empty() {
            log::debug!("{}: no note URLs", child);
        } else {
            log::debug!(
                "{}: {} note URLs ({} fresh, {} stale)",
                child,
                buckets.len(),
                buckets.fresh.len(),
                buckets.stale.len()
            );
        }
        stats.fresh_found += buckets.fresh.len();
        stats.stale_found += buckets.stale.len();
        distinct_fresh.extend(buckets.fresh.iter().cloned());
        fresh_all.extend(buckets.fresh);
        stale_all.extend(buckets.stale);

        if distinct_fresh.len() >= sampling.min_urls {
            stats.stopped_early = position + 1 < children.len();
            break;
        }
    }

    let urls = dedup_bounded(fresh_all.into_iter().chain(stale_all), sampling.max_urls);
    log_summary(&stats, distinct_fresh.len(), urls.len());

    if urls.is_empty() {
        return Err(AppError::NoCandidates);
    }

    Ok(RunResult::new(now, urls))
}

async fn fetch_child(
    source: &dyn SitemapSource,
    url: &str,
    now: DateTime<Utc>,
    within_hours: u32,
) -> Result<UrlBuckets> {
    let nodes = sitemap::load_child(source, url).await?;
    Ok(extract(&nodes, now, within_hours))
}

fn log_summary(stats: &RunStats, distinct_fresh: usize, kept: usize) {
    log::info!(
        "Visited {}/{} child sitemaps ({} failed{})",
        stats.children_attempted,
        stats.children_selected,
        stats.children_failed,
        if stats.stopped_early {
            ", stopped early"
        } else {
            ""
        }
    );
    log::info!(
        "Collected {} fresh ({} distinct) and {} stale URLs, kept {}",
        stats.fresh_found,
        distinct_fresh,
        stats.stale_found,
        kept
    );
}
