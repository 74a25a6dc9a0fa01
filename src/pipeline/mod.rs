//! Pipeline stages for one aggregation run.
//!
//! - `dedup_postings` / `filter_postings`: the pure record stages
//! - `run_pipeline`: fetch → dedup → filter → CSV orchestration

pub mod filter;
pub mod run;

pub use filter::{dedup_postings, filter_postings};
pub use run::{PipelineSummary, run_pipeline};
