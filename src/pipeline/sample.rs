// src/pipeline/sample.rs

//! Build-then-write pipeline used by the CLI.

use crate::error::Result;
use crate::models::{Config, RunResult};
use crate::services::SitemapSource;
use crate::storage::ResultStorage;
use crate::utils::Clock;

use super::build::build_urls;

/// Build the URL list and persist it.
///
/// Nothing is written when building fails.
pub async fn run_sampler(
    config: &Config,
    source: &dyn SitemapSource,
    clock: &dyn Clock,
    storage: &dyn ResultStorage,
) -> Result<RunResult> {
    log::info!("Reading sitemap index {}", config.fetch.index_url);
    let result = build_urls(config, source, clock).await?;

    match storage.load_result().await {
        Ok(Some(previous)) => log::info!(
            "Replacing artifact generated at {} ({} URLs)",
            previous.generated_at,
            previous.urls.len()
        ),
        Ok(None) => {}
        Err(error) => log::warn!("Existing artifact is unreadable, overwriting: {}", error),
    }

    let meta = storage.write_result(&result).await?;
    log::debug!("Artifact timestamp: {}", meta.timestamp);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::pipeline::build::tests::{
        FakeSource, INDEX_URL, config, index_xml, now, stamp, urlset_xml,
    };
    use crate::storage::LocalStorage;
    use crate::utils::FixedClock;
    use tempfile::TempDir;

    const CHILD: &str = "https://note.com/sitemap/notes-1.xml";

    #[tokio::test]
    async fn test_run_writes_artifact() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("public/urls.json"));
        let source = FakeSource::default()
            .with(INDEX_URL, index_xml(&[(CHILD, Some(stamp(1)))]))
            .with(
                CHILD,
                urlset_xml(&[("https://note.com/a/n/n1", Some(stamp(3)))]),
            );

        let result = run_sampler(&config(30, 5000, 300), &source, &FixedClock(now()), &storage)
            .await
            .unwrap();

        let stored = storage.load_result().await.unwrap().unwrap();
        assert_eq!(stored, result);
        assert_eq!(stored.urls, vec!["https://note.com/a/n/n1"]);
    }

    #[tokio::test]
    async fn test_failed_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("public/urls.json");
        let storage = LocalStorage::new(&path);
        let source = FakeSource::default().with(INDEX_URL, index_xml(&[]));

        let result =
            run_sampler(&config(30, 5000, 300), &source, &FixedClock(now()), &storage).await;

        assert!(matches!(result, Err(AppError::EmptyIndex)));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unreadable_previous_artifact_is_replaced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("urls.json");
        std::fs::write(&path, b"garbage").unwrap();
        let storage = LocalStorage::new(&path);
        let source = FakeSource::default()
            .with(INDEX_URL, index_xml(&[(CHILD, None)]))
            .with(CHILD, urlset_xml(&[("https://note.com/a/n/n1", None)]));

        run_sampler(&config(30, 5000, 300), &source, &FixedClock(now()), &storage)
            .await
            .unwrap();

        let stored = storage.load_result().await.unwrap().unwrap();
        assert_eq!(stored.generated_at, "2026-10-18T12:00:00Z");
    }
}
