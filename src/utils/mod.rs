//! Utility functions and helpers.

pub mod date;
pub mod text;

pub use date::{parse_relative_or_absolute, within_window};
pub use text::{InterestMatcher, truncate_chars};
