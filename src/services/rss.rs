// src/services/rss.rs

//! RSS feed fetcher.
//!
//! Fetches each configured feed URL, extracts `item` elements with a
//! streaming XML reader, and maps them into [`Posting`]s. A failing feed is
//! logged and skipped; the run continues with the remaining feeds.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{AppError, Result};
use crate::models::{Config, Posting};
use crate::utils::{parse_relative_or_absolute, truncate_chars};

/// Characters kept from the raw description.
const DESCRIPTION_CHARS: usize = 1000;

/// Characters kept for the output short description.
const SHORT_DESCRIPTION_CHARS: usize = 300;

/// RFC-822-style date prefix used by RSS `pubDate`, e.g.
/// "Mon, 01 Jan 2024 10:00:00". Exactly 25 characters.
const PUBDATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";
const PUBDATE_PREFIX_CHARS: usize = 25;

/// Service fetching postings from RSS feeds.
pub struct RssFetcher {
    client: reqwest::Client,
    item_limit: usize,
}

impl RssFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.fetcher.user_agent)
            .timeout(Duration::from_secs(config.fetcher.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            item_limit: config.output.limit,
        })
    }

    /// Fetch every feed in order. Per-feed failures are logged and skipped;
    /// no retries.
    pub async fn fetch_all(&self, feed_urls: &[String]) -> Vec<Posting> {
        let mut postings = Vec::new();

        for url in feed_urls {
            match self.fetch_feed(url).await {
                Ok(items) => {
                    log::debug!("RSS feed {}: {} items", url, items.len());
                    postings.extend(items);
                }
                Err(error) => {
                    log::warn!("RSS fetch error for {}: {}", url, error);
                }
            }
        }

        log::info!("RSS: collected {} postings", postings.len());
        postings
    }

    async fn fetch_feed(&self, url: &str) -> Result<Vec<Posting>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(url, format!("HTTP {status}")));
        }

        let body = response.bytes().await?;
        parse_feed(&body, self.item_limit)
    }
}

/// Parse a feed document into postings, taking at most `limit` items.
pub fn parse_feed(xml: &[u8], limit: usize) -> Result<Vec<Posting>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut postings = Vec::new();
    let mut buf = Vec::new();

    let mut current_item: Option<ItemBuilder> = None;
    let mut current_element = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" {
                    current_item = Some(ItemBuilder::default());
                }
                current_element = name;
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" {
                    if let Some(builder) = current_item.take() {
                        postings.push(builder.build());
                        if postings.len() >= limit {
                            break;
                        }
                    }
                }
                current_element.clear();
            }
            Ok(Event::Text(e)) => {
                if let Some(ref mut item) = current_item {
                    let text = e.unescape().unwrap_or_default();
                    item.append(&current_element, &text);
                }
            }
            Ok(Event::CData(e)) => {
                // Feed descriptions commonly arrive as CDATA
                if let Some(ref mut item) = current_item {
                    let text = String::from_utf8_lossy(&e);
                    item.append(&current_element, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AppError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(postings)
}

/// Accumulates the child elements of one `item` until its end tag.
#[derive(Default)]
struct ItemBuilder {
    title: String,
    link: String,
    description: String,
    pub_date: String,
    published: String,
}

impl ItemBuilder {
    fn append(&mut self, element: &str, text: &str) {
        let field = match element {
            "title" => &mut self.title,
            "link" => &mut self.link,
            "description" => &mut self.description,
            "pubDate" => &mut self.pub_date,
            "published" => &mut self.published,
            _ => return,
        };
        field.push_str(text);
    }

    fn build(self) -> Posting {
        let description = truncate_chars(&self.description, DESCRIPTION_CHARS);
        let remote = format!("{}{}", self.title, description)
            .to_lowercase()
            .contains("remote");

        let raw_date = if self.pub_date.is_empty() {
            &self.published
        } else {
            &self.pub_date
        };
        let posted_at = parse_publish_date(raw_date);

        Posting {
            title: self.title,
            company: None,
            location_plain: String::new(),
            location_list: Vec::new(),
            remote,
            short_description: truncate_chars(&description, SHORT_DESCRIPTION_CHARS),
            skills: description,
            experience_years: None,
            link: self.link,
            posted_at,
        }
    }
}

/// Parse an RSS publish date: the fixed-width RFC-822-style prefix first,
/// interpreted as UTC, then the generic relative/absolute parser.
fn parse_publish_date(raw: &str) -> Option<DateTime<Utc>> {
    let prefix: String = raw.chars().take(PUBDATE_PREFIX_CHARS).collect();
    if let Ok(naive) = NaiveDateTime::parse_from_str(&prefix, PUBDATE_FORMAT) {
        return Some(naive.and_utc());
    }
    parse_relative_or_absolute(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(items: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Jobs</title>{items}</channel></rss>"#
        )
    }

    #[test]
    fn parses_basic_item() {
        let xml = feed(
            r#"<item>
                <title>Java Developer</title>
                <link>https://example.com/jobs/1</link>
                <description>Spring Boot, remote work possible</description>
                <pubDate>Mon, 01 Jan 2024 10:00:00 GMT</pubDate>
            </item>"#,
        );

        let postings = parse_feed(xml.as_bytes(), 200).unwrap();
        assert_eq!(postings.len(), 1);

        let posting = &postings[0];
        assert_eq!(posting.title, "Java Developer");
        assert_eq!(posting.link, "https://example.com/jobs/1");
        assert!(posting.remote);
        assert!(posting.company.is_none());
        assert!(posting.location_plain.is_empty());
        assert_eq!(
            posting.posted_at.unwrap().to_rfc3339(),
            "2024-01-01T10:00:00+00:00"
        );
    }

    #[test]
    fn falls_back_to_published_and_generic_parser() {
        let xml = feed(
            r#"<item>
                <title>Backend Engineer</title>
                <link>https://example.com/jobs/2</link>
                <description>SQL</description>
                <published>2024-03-05T08:00:00Z</published>
            </item>"#,
        );

        let postings = parse_feed(xml.as_bytes(), 200).unwrap();
        assert_eq!(
            postings[0].posted_at.unwrap().to_rfc3339(),
            "2024-03-05T08:00:00+00:00"
        );
    }

    #[test]
    fn unparseable_date_becomes_absent() {
        let xml = feed(
            r#"<item>
                <title>Java Developer</title>
                <link>https://example.com/jobs/3</link>
                <pubDate>yesterday-ish</pubDate>
            </item>"#,
        );

        let postings = parse_feed(xml.as_bytes(), 200).unwrap();
        assert!(postings[0].posted_at.is_none());
    }

    #[test]
    fn reads_cdata_description() {
        let xml = feed(
            r#"<item>
                <title>Java Developer</title>
                <description><![CDATA[<b>Spring</b> microservices]]></description>
            </item>"#,
        );

        let postings = parse_feed(xml.as_bytes(), 200).unwrap();
        assert!(postings[0].skills.contains("microservices"));
    }

    #[test]
    fn caps_item_count() {
        let item = r#"<item><title>Job</title><link>https://example.com/j</link></item>"#;
        let xml = feed(&item.repeat(5));

        let postings = parse_feed(xml.as_bytes(), 3).unwrap();
        assert_eq!(postings.len(), 3);
    }

    #[test]
    fn truncates_long_description() {
        let long = "y".repeat(2000);
        let xml = feed(&format!(
            "<item><title>Job</title><description>{long}</description></item>"
        ));

        let postings = parse_feed(xml.as_bytes(), 200).unwrap();
        assert_eq!(postings[0].skills.chars().count(), 1000);
        assert_eq!(postings[0].short_description.chars().count(), 300);
    }

    #[test]
    fn rejects_malformed_xml() {
        let xml = "<rss><channel><item><title>Broken</channel>";
        assert!(parse_feed(xml.as_bytes(), 200).is_err());
    }

    #[test]
    fn pubdate_prefix_parses_exactly_25_chars() {
        let parsed = parse_publish_date("Mon, 01 Jan 2024 10:00:00 +0530");
        // Prefix wins; the zone suffix is ignored and the time read as UTC
        assert_eq!(parsed.unwrap().to_rfc3339(), "2024-01-01T10:00:00+00:00");
    }
}
