// src/pipeline/run.rs

//! Aggregation pipeline: collect, deduplicate, filter, write.

use crate::error::Result;
use crate::models::{AdzunaCredentials, Config};
use crate::pipeline::{dedup_postings, filter_postings};
use crate::services::{AdzunaFetcher, RssFetcher};
use crate::storage::write_csv;
use crate::utils::InterestMatcher;

/// Outcome of one aggregation run.
#[derive(Debug)]
pub struct PipelineSummary {
    /// Rows written to the output file
    pub written: usize,
    /// Path of the output file
    pub output_path: String,
}

/// Run the full pipeline once: fetch from every configured source, dedup,
/// filter, and write the survivors to CSV.
///
/// Fetch-level failures never surface here; each fetcher returns whatever it
/// accumulated. Only configuration and output-file errors are propagated.
pub async fn run_pipeline(
    config: &Config,
    credentials: Option<AdzunaCredentials>,
) -> Result<PipelineSummary> {
    let matcher = InterestMatcher::new(&config.search.keywords, &config.search.roles_pattern)?;

    let mut candidates = Vec::new();

    if let Some(credentials) = credentials {
        log::info!("Fetching Adzuna jobs...");
        let fetcher = AdzunaFetcher::new(config, credentials)?;
        candidates.extend(fetcher.fetch_all().await);
    } else {
        log::debug!("Adzuna credentials not set, skipping API source");
    }

    if !config.rss_feeds.is_empty() {
        log::info!("Fetching {} RSS feeds...", config.rss_feeds.len());
        let fetcher = RssFetcher::new(config)?;
        candidates.extend(fetcher.fetch_all(&config.rss_feeds).await);
    }

    log::info!("Collected {} candidate postings", candidates.len());

    let deduped = dedup_postings(candidates);
    log::debug!("{} postings after deduplication", deduped.len());

    let filtered = filter_postings(deduped, &config.search, &matcher);
    log::info!("{} postings passed all filters", filtered.len());

    let written = write_csv(&config.output.path, &filtered)?;

    Ok(PipelineSummary {
        written,
        output_path: config.output.path.clone(),
    })
}
