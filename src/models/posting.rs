//! Posting data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized job posting produced by one of the fetchers.
///
/// Postings are constructed once by a fetcher and never mutated afterwards;
/// the pipeline only drops whole records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Posting {
    /// Job title (may be empty)
    pub title: String,

    /// Company display name (API source only)
    pub company: Option<String>,

    /// Free-text location description
    pub location_plain: String,

    /// Ordered area names, broadest first (API source only)
    pub location_list: Vec<String>,

    /// True if "remote" appears in the title or description
    pub remote: bool,

    /// Raw description text used for keyword matching
    pub skills: String,

    /// Structured experience requirement in years, when a source provides one
    pub experience_years: Option<f64>,

    /// Canonical URL to the posting
    pub link: String,

    /// When the posting was published
    pub posted_at: Option<DateTime<Utc>>,

    /// Truncated description for the output row
    pub short_description: String,
}

impl Posting {
    /// Identity key used for deduplication: the link when it carries any
    /// non-whitespace content, the title otherwise. `None` when both are
    /// blank, which drops the record from the deduplicated set.
    ///
    /// The title fallback can merge two distinct postings that share a title;
    /// a known approximation inherited from the upstream feeds, which do not
    /// always provide links.
    pub fn identity_key(&self) -> Option<&str> {
        let link = self.link.trim();
        if !link.is_empty() {
            return Some(link);
        }
        let title = self.title.trim();
        if !title.is_empty() {
            return Some(title);
        }
        None
    }

    /// Location text used by the location filter: the plain display name when
    /// present, otherwise the area list joined with spaces.
    pub fn location_text(&self) -> String {
        if !self.location_plain.is_empty() {
            self.location_plain.clone()
        } else {
            self.location_list.join(" ")
        }
    }

    /// Combined text blob the keyword filter runs against.
    pub fn interest_text(&self) -> String {
        [
            self.title.as_str(),
            self.skills.as_str(),
            self.short_description.as_str(),
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}
