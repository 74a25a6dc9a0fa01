//! Output sink.
//!
//! The sole persisted artifact is one CSV file, overwritten each run.

mod csv;

pub use csv::write_csv;
