// src/utils/text.rs

//! Keyword matching and text helpers.

use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// Matches posting text against the configured keyword allowlist, falling
/// back to a role-title pattern when no keyword hits.
pub struct InterestMatcher {
    keywords: Vec<String>,
    roles: Regex,
}

impl InterestMatcher {
    /// Build a matcher from keyword strings and a role pattern. Keywords are
    /// lowercased once here; the pattern is compiled case-insensitively.
    pub fn new(keywords: &[String], roles_pattern: &str) -> Result<Self> {
        let keywords = keywords.iter().map(|k| k.to_lowercase()).collect();
        let roles = RegexBuilder::new(roles_pattern)
            .case_insensitive(true)
            .build()?;
        Ok(Self { keywords, roles })
    }

    /// True when any keyword appears as a substring of the lowercased input,
    /// or the role pattern matches anywhere. Empty input never matches.
    pub fn matches(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let lower = text.to_lowercase();
        if self.keywords.iter().any(|k| lower.contains(k)) {
            return true;
        }
        self.roles.is_match(&lower)
    }
}

/// Take the first `max` characters of a string, respecting char boundaries.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
