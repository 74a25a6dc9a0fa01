//! Source fetchers.
//!
//! Each fetcher is an independent producer of [`crate::models::Posting`]
//! records:
//! - Adzuna search API (`AdzunaFetcher`)
//! - RSS feeds (`RssFetcher`)

pub mod adzuna;
pub mod rss;

pub use adzuna::AdzunaFetcher;
pub use rss::RssFetcher;
