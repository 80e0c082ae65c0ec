//! Data models for scraped articles.
//!
//! - [`Article`]: one headline pulled from a competitor's listing page
//! - [`Digest`]: the serializable view of a whole run, used for JSON output
//!
//! Articles are created once during extraction and never mutated. They move
//! from the aggregator into the report builder; nothing holds them after the
//! report is written.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Format used for the capture timestamp in reports (ISO-8601, microseconds).
pub const SCRAPED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A single article discovered on a competitor's listing page.
///
/// # Fields
///
/// * `title` - Visible text of the matched element, trimmed. May be empty.
/// * `url` - Absolute link target, or empty when the element had no `href`.
/// * `source` - Name of the competitor whose listing page produced it.
/// * `scraped_at` - Local capture time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    /// The headline text.
    pub title: String,
    /// The absolute article URL, or an empty string.
    pub url: String,
    /// The competitor this article belongs to.
    pub source: String,
    /// When the article was captured.
    pub scraped_at: NaiveDateTime,
}

impl Article {
    /// Build an article stamped with the current local time.
    pub fn captured_now(title: String, url: String, source: &str) -> Self {
        Self {
            title,
            url,
            source: source.to_string(),
            scraped_at: Local::now().naive_local(),
        }
    }

    /// Capture time rendered as ISO-8601.
    pub fn scraped_at_iso(&self) -> String {
        self.scraped_at.format(SCRAPED_AT_FORMAT).to_string()
    }
}

/// Everything one run produced, in the order it was scraped.
#[derive(Debug, Serialize)]
pub struct Digest<'a> {
    /// The calendar day the report covers.
    pub date: NaiveDate,
    /// Number of articles across all competitors.
    pub total_articles: usize,
    /// The articles themselves.
    pub articles: &'a [Article],
}
