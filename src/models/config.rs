//! Application configuration structures.

use std::env;
use std::fs;
use std::path::Path;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Keyword, location and recency filter settings
    #[serde(default)]
    pub search: SearchConfig,

    /// HTTP and source behavior settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// RSS feed URLs to poll (empty list disables the RSS source)
    #[serde(default)]
    pub rss_feeds: Vec<String>,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.search.keywords.is_empty() {
            return Err(AppError::validation("search.keywords is empty"));
        }
        if self.search.post_within_hours == 0 {
            return Err(AppError::validation(
                "search.post_within_hours must be > 0",
            ));
        }
        if self.search.exp_min > self.search.exp_max {
            return Err(AppError::validation(
                "search.exp_min must not exceed search.exp_max",
            ));
        }
        if let Err(e) = RegexBuilder::new(&self.search.roles_pattern)
            .case_insensitive(true)
            .build()
        {
            return Err(AppError::validation(format!(
                "search.roles_pattern does not compile: {e}"
            )));
        }
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.output.limit == 0 {
            return Err(AppError::validation("output.limit must be > 0"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            fetcher: FetcherConfig::default(),
            rss_feeds: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

/// Filter settings: what counts as an interesting, reachable, recent posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Role-title pattern matched case-insensitively when no keyword hits
    #[serde(default = "defaults::roles_pattern")]
    pub roles_pattern: String,

    /// Keywords searched as substrings in title + description
    #[serde(default = "defaults::keywords")]
    pub keywords: Vec<String>,

    /// Allowed location substrings; a posting passes when any matches
    /// or when it is flagged remote
    #[serde(default = "defaults::locations_allowed")]
    pub locations_allowed: Vec<String>,

    /// Inclusive experience range in years, applied only when a source
    /// provides a structured experience value
    #[serde(default = "defaults::exp_min")]
    pub exp_min: f64,

    #[serde(default = "defaults::exp_max")]
    pub exp_max: f64,

    /// Trailing recency window in hours
    #[serde(default = "defaults::post_within_hours")]
    pub post_within_hours: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            roles_pattern: defaults::roles_pattern(),
            keywords: defaults::keywords(),
            locations_allowed: defaults::locations_allowed(),
            exp_min: defaults::exp_min(),
            exp_max: defaults::exp_max(),
            post_within_hours: defaults::post_within_hours(),
        }
    }
}

/// HTTP client and source behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between API page requests in milliseconds
    #[serde(default = "defaults::page_delay")]
    pub page_delay_ms: u64,

    /// Adzuna country code (e.g. "in" for India)
    #[serde(default = "defaults::adzuna_country")]
    pub adzuna_country: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            page_delay_ms: defaults::page_delay(),
            adzuna_country: defaults::adzuna_country(),
        }
    }
}

/// Output sink settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV file to write (overwritten each run)
    #[serde(default = "defaults::output_path")]
    pub path: String,

    /// Maximum items taken from each RSS feed
    #[serde(default = "defaults::output_limit")]
    pub limit: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: defaults::output_path(),
            limit: defaults::output_limit(),
        }
    }
}

/// Adzuna API credentials, read from the process environment.
///
/// Their presence toggles the API source: when either variable is missing the
/// fetcher is never attempted and the run proceeds on RSS feeds alone.
#[derive(Debug, Clone)]
pub struct AdzunaCredentials {
    pub app_id: String,
    pub app_key: String,
}

impl AdzunaCredentials {
    /// Read credentials from `ADZUNA_APP_ID` / `ADZUNA_APP_KEY`.
    pub fn from_env() -> Option<Self> {
        let app_id = env::var("ADZUNA_APP_ID").ok().filter(|v| !v.is_empty())?;
        let app_key = env::var("ADZUNA_APP_KEY").ok().filter(|v| !v.is_empty())?;
        Some(Self { app_id, app_key })
    }
}

mod defaults {
    // Search defaults
    pub fn roles_pattern() -> String {
        r"(Software Engineer|Full[- ]stack|Backend Developer|Java Developer)".into()
    }
    pub fn keywords() -> Vec<String> {
        [
            "Java",
            "Spring",
            "Spring Boot",
            "Java 8",
            "Java 11",
            "Microservices",
            "Hibernate",
            "J2EE",
            "REST",
            "Node.js",
            "React",
            "SQL",
            "Multithreading",
            "Servlets",
            "Core Java",
            "Data Structure",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
    pub fn locations_allowed() -> Vec<String> {
        vec![
            "India".into(),
            "Remote".into(),
            "Bengaluru".into(),
            "Bangalore".into(),
        ]
    }
    pub fn exp_min() -> f64 {
        2.0
    }
    pub fn exp_max() -> f64 {
        4.0
    }
    pub fn post_within_hours() -> u64 {
        48
    }

    // Fetcher defaults
    pub fn user_agent() -> String {
        "job-scraper/1.0".into()
    }
    pub fn timeout() -> u64 {
        15
    }
    pub fn page_delay() -> u64 {
        500
    }
    pub fn adzuna_country() -> String {
        "in".into()
    }

    // Output defaults
    pub fn output_path() -> String {
        "job_results.csv".into()
    }
    pub fn output_limit() -> usize {
        200
    }
}
