// src/services/adzuna.rs

//! Adzuna job-search API fetcher.
//!
//! Queries the paged search endpoint and maps each result into a [`Posting`].
//! The source is opportunistic: it only runs when both credential strings are
//! present in the environment, and any transport or decode failure ends the
//! page loop with whatever was accumulated so far.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{AdzunaCredentials, Config, Posting};
use crate::utils::{parse_relative_or_absolute, truncate_chars};

/// Fixed page size requested from the endpoint.
const PAGE_SIZE: u64 = 50;

/// Hard cap on pages fetched per run.
const MAX_PAGES: u64 = 5;

/// Characters kept for the output short description.
const SHORT_DESCRIPTION_CHARS: usize = 300;

/// One page of the Adzuna search response.
#[derive(Debug, Deserialize)]
pub struct AdzunaPage {
    #[serde(default)]
    pub results: Vec<AdzunaJob>,

    /// Endpoint-reported total result count across all pages
    #[serde(default)]
    pub count: u64,
}

/// One raw result item. Every field is best-effort; missing values map to
/// empty/absent Posting fields rather than failing the item.
#[derive(Debug, Default, Deserialize)]
pub struct AdzunaJob {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<AdzunaCompany>,
    #[serde(default)]
    pub location: Option<AdzunaLocation>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdzunaCompany {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdzunaLocation {
    #[serde(default)]
    pub area: Vec<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Service fetching postings from the Adzuna search API.
pub struct AdzunaFetcher {
    client: reqwest::Client,
    credentials: AdzunaCredentials,
    country: String,
    what: String,
    page_delay: Duration,
}

impl AdzunaFetcher {
    /// Create a new fetcher with the given configuration and credentials.
    pub fn new(config: &Config, credentials: AdzunaCredentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.fetcher.user_agent)
            .timeout(Duration::from_secs(config.fetcher.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            credentials,
            country: config.fetcher.adzuna_country.clone(),
            what: config.search.keywords.join(" OR "),
            page_delay: Duration::from_millis(config.fetcher.page_delay_ms),
        })
    }

    /// Fetch pages until the endpoint runs out of results, a request fails,
    /// or the page cap is reached. Never raises past the fetcher boundary.
    pub async fn fetch_all(&self) -> Vec<Posting> {
        let mut postings = Vec::new();
        let mut fetched: u64 = 0;

        for page in 1..=MAX_PAGES {
            let page_data = match self.fetch_page(page).await {
                Ok(data) => data,
                Err(error) => {
                    log::warn!("Adzuna page {} failed: {}", page, error);
                    break;
                }
            };

            fetched += page_data.results.len() as u64;
            let total = page_data.count;
            postings.extend(map_page(page_data));

            if fetched >= total || page == MAX_PAGES {
                break;
            }

            // Pause between pages to stay clear of rate limits
            tokio::time::sleep(self.page_delay).await;
        }

        log::info!("Adzuna: collected {} postings", postings.len());
        postings
    }

    async fn fetch_page(&self, page: u64) -> Result<AdzunaPage> {
        let url = format!(
            "https://api.adzuna.com/v1/api/jobs/{}/search/{}",
            self.country, page
        );
        let page_size = PAGE_SIZE.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", self.credentials.app_id.as_str()),
                ("app_key", self.credentials.app_key.as_str()),
                ("results_per_page", page_size.as_str()),
                ("what", self.what.as_str()),
                ("content-type", "application/json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(
                format!("adzuna page {page}"),
                format!("HTTP {status}"),
            ));
        }

        Ok(response.json().await?)
    }
}

/// Deserialize a raw response body into a page. Split out from the HTTP path
/// so synthetic payloads can drive the mapping in tests.
pub fn parse_page(body: &[u8]) -> Result<AdzunaPage> {
    Ok(serde_json::from_slice(body)?)
}

/// Map a deserialized page into postings.
pub fn map_page(page: AdzunaPage) -> Vec<Posting> {
    page.results.into_iter().map(map_job).collect()
}

fn map_job(job: AdzunaJob) -> Posting {
    let title = job.title.unwrap_or_default();
    let description = job.description.unwrap_or_default();
    let remote = format!("{description}{title}").to_lowercase().contains("remote");

    let (location_list, location_plain) = match job.location {
        Some(location) => (location.area, location.display_name.unwrap_or_default()),
        None => (Vec::new(), String::new()),
    };

    // Malformed created dates become None; the recency filter drops those later
    let posted_at = job.created.as_deref().and_then(parse_relative_or_absolute);

    Posting {
        title,
        company: job.company.and_then(|c| c.display_name),
        location_plain,
        location_list,
        remote,
        short_description: truncate_chars(&description, SHORT_DESCRIPTION_CHARS),
        skills: description,
        // Adzuna exposes no structured experience field
        experience_years: None,
        link: job.redirect_url.unwrap_or_default(),
        posted_at,
    }
}
