// src/storage/csv.rs

//! CSV output sink.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::Posting;

/// Fixed output columns, in order.
const HEADERS: [&str; 9] = [
    "title",
    "company",
    "location_plain",
    "remote",
    "skills",
    "experience_years",
    "link",
    "posted_at",
    "short_description",
];

/// One output row. Timestamps serialize as RFC 3339, absent values as empty
/// fields.
#[derive(Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    company: &'a str,
    location_plain: &'a str,
    remote: bool,
    skills: &'a str,
    experience_years: Option<f64>,
    link: &'a str,
    posted_at: String,
    short_description: &'a str,
}

impl<'a> From<&'a Posting> for CsvRow<'a> {
    fn from(posting: &'a Posting) -> Self {
        Self {
            title: &posting.title,
            company: posting.company.as_deref().unwrap_or(""),
            location_plain: &posting.location_plain,
            remote: posting.remote,
            skills: &posting.skills,
            experience_years: posting.experience_years,
            link: &posting.link,
            posted_at: posting
                .posted_at
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default(),
            short_description: &posting.short_description,
        }
    }
}

/// Write all postings to `path`, overwriting any existing file. The header
/// row is always written, even for an empty result set. Returns the number
/// of data rows.
pub fn write_csv(path: impl AsRef<Path>, postings: &[Posting]) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(HEADERS)?;
    for posting in postings {
        writer.serialize(CsvRow::from(posting))?;
    }
    writer.flush()?;

    Ok(postings.len())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use super::*;

    fn sample_posting() -> Posting {
        Posting {
            title: "Java Developer".to_string(),
            company: Some("Acme".to_string()),
            location_plain: "Bengaluru".to_string(),
            location_list: Vec::new(),
            remote: true,
            skills: "Java, Spring".to_string(),
            experience_years: None,
            link: "https://example.com/jobs/1".to_string(),
            posted_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()),
            short_description: "Java, Spring".to_string(),
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.csv");

        let written = write_csv(&path, &[sample_posting()]).unwrap();
        assert_eq!(written, 1);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "title,company,location_plain,remote,skills,experience_years,link,posted_at,short_description"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("Java Developer"));
        assert!(row.contains("true"));
        assert!(row.contains("2024-01-15T10:30:00+00:00"));
    }

    #[test]
    fn empty_set_still_writes_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.csv");

        let written = write_csv(&path, &[]).unwrap();
        assert_eq!(written, 0);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("title,company,"));
    }

    #[test]
    fn absent_fields_serialize_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.csv");

        let mut posting = sample_posting();
        posting.company = None;
        posting.posted_at = None;
        // Keep fields comma-free so the raw line splits cleanly
        posting.skills = "Java Spring".to_string();
        posting.short_description = "Java Spring".to_string();
        write_csv(&path, &[posting]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(',').collect();
        // company and posted_at columns are empty
        assert_eq!(fields[1], "");
        assert_eq!(fields[7], "");
    }

    #[test]
    fn overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.csv");

        write_csv(&path, &[sample_posting()]).unwrap();
        write_csv(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
