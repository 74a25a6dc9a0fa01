// src/pipeline/filter.rs

//! Deduplication and filter stages.

use std::collections::HashSet;

use crate::models::{Posting, SearchConfig};
use crate::utils::{InterestMatcher, within_window};

/// Drop postings whose identity key is blank or already seen, preserving
/// first-seen order.
pub fn dedup_postings(postings: Vec<Posting>) -> Vec<Posting> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::new();

    for posting in postings {
        let Some(key) = posting.identity_key() else {
            continue;
        };
        if seen.insert(key.to_string()) {
            deduped.push(posting);
        }
    }

    deduped
}

/// Keep postings that pass all filter stages, in order.
pub fn filter_postings(
    postings: Vec<Posting>,
    search: &SearchConfig,
    matcher: &InterestMatcher,
) -> Vec<Posting> {
    postings
        .into_iter()
        .filter(|posting| passes(posting, search, matcher))
        .collect()
}

/// The four filter conditions, checked in order with short-circuiting:
/// recency, keyword interest, location-or-remote, experience range.
fn passes(posting: &Posting, search: &SearchConfig, matcher: &InterestMatcher) -> bool {
    if !within_window(posting.posted_at, search.post_within_hours) {
        return false;
    }

    if !matcher.matches(&posting.interest_text()) {
        return false;
    }

    let location = posting.location_text().to_lowercase();
    let location_ok = search
        .locations_allowed
        .iter()
        .any(|allowed| location.contains(&allowed.to_lowercase()));
    if !location_ok && !posting.remote {
        return false;
    }

    // Absent experience passes vacuously; no current source sets the field,
    // but the range check stays observable for sources that might
    if let Some(experience) = posting.experience_years {
        if experience < search.exp_min || experience > search.exp_max {
            return false;
        }
    }

    true
}
