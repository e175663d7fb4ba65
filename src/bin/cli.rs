//! Note sitemap sampler CLI
//!
//! Builds `public/urls.json` from the note sitemap index.

use std::path::PathBuf;

use clap::Parser;
use sampler::{
    error::{AppError, Result},
    models::{Config, FetchConfig, OutputConfig, SamplingConfig},
    pipeline,
    services::HttpSource,
    storage::LocalStorage,
    utils::SystemClock,
};

/// Build a URL list of recently updated notes from the note sitemap
#[derive(Parser, Debug)]
#[command(name = "note-sampler", version, about)]
struct Cli {
    #[arg(short, long, help = with_default(
        "TOML config file; flags override its values",
        Config::DEFAULT_FILE,
    ))]
    config: Option<PathBuf>,

    #[arg(short, long, help = with_default(
        "Output path for the JSON artifact",
        OutputConfig::DEFAULT_PATH,
    ))]
    output: Option<PathBuf>,

    #[arg(long, help = with_default("Sitemap index URL", FetchConfig::DEFAULT_INDEX_URL))]
    index_url: Option<String>,

    #[arg(long, help = with_default(
        "Maximum number of child sitemaps to inspect",
        SamplingConfig::DEFAULT_MAX_CHILDREN,
    ))]
    max_children: Option<usize>,

    #[arg(long, help = with_default(
        "Maximum number of URLs to emit",
        SamplingConfig::DEFAULT_MAX_URLS,
    ))]
    max_urls: Option<usize>,

    #[arg(long, help = with_default(
        "Distinct fresh URLs that stop child iteration early",
        SamplingConfig::DEFAULT_MIN_URLS,
    ))]
    min_urls: Option<usize>,

    #[arg(long, help = with_default(
        "Recency window for fresh URLs, in hours",
        SamplingConfig::DEFAULT_WITHIN_HOURS,
    ))]
    within_hours: Option<u32>,

    #[arg(long, help = with_default(
        "Per-request timeout in seconds",
        FetchConfig::DEFAULT_TIMEOUT_SECS,
    ))]
    timeout: Option<u64>,

    #[arg(long, help = with_default(
        "Seed for child sitemap selection",
        SamplingConfig::DEFAULT_SEED,
    ))]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Help text that shows the config default a flag overrides.
fn with_default(help: &str, default: impl std::fmt::Display) -> String {
    format!("{help} [default: {default}]")
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    fn apply(self, mut config: Config) -> Config {
        if let Some(path) = self.output {
            config.output.path = path;
        }
        if let Some(url) = self.index_url {
            config.fetch.index_url = url;
        }
        if let Some(timeout) = self.timeout {
            config.fetch.timeout_secs = timeout;
        }
        if let Some(max_children) = self.max_children {
            config.sampling.max_children = max_children;
        }
        if let Some(max_urls) = self.max_urls {
            config.sampling.max_urls = max_urls;
        }
        if let Some(min_urls) = self.min_urls {
            config.sampling.min_urls = min_urls;
        }
        if let Some(within_hours) = self.within_hours {
            config.sampling.within_hours = within_hours;
        }
        if let Some(seed) = self.seed {
            config.sampling.seed = seed;
        }
        config
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            Config::load(path)
                .map_err(|e| AppError::config(format!("{}: {}", path.display(), e)))?
        }
        None => Config::load_or_default(Config::DEFAULT_FILE),
    };
    let config = cli.apply(config);

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let source = HttpSource::new(&config.fetch)?;
    let storage = LocalStorage::new(&config.output.path);

    match pipeline::run_sampler(&config, &source, &SystemClock, &storage).await {
        Ok(result) => {
            log::info!(
                "Done! {} URLs written to {}",
                result.urls.len(),
                storage.path().display()
            );
            Ok(())
        }
        Err(e) => {
            if e.is_empty_result() {
                log::error!("Nothing to write: {}", e);
            } else {
                log::error!("Run failed: {}", e);
            }
            Err(e)
        }
    }
}
