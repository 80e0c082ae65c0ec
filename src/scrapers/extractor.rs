//! Selector-driven article extraction.
//!
//! One generic routine serves every competitor: the per-site differences
//! live entirely in the [`SelectorSet`] from the configuration.

use crate::config::SelectorSet;
use crate::models::Article;
use crate::utils::truncate_for_log;
use scraper::{Html, Selector};
use std::fmt;
use tracing::{debug, warn};

/// Why a fetched page could not be turned into articles.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// The configured CSS selector does not parse.
    InvalidSelector { selector: String, reason: String },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSelector { selector, reason } => {
                write!(f, "invalid CSS selector `{}`: {}", selector, reason)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Scheme, host and port of `listing_url`: its first three `/`-separated
/// segments joined back together (`https://example.com/blog` gives
/// `https://example.com`).
pub fn origin_of(listing_url: &str) -> String {
    listing_url.split('/').take(3).collect::<Vec<_>>().join("/")
}

/// Resolve a raw `href` against the listing page.
///
/// Empty stays empty and anything starting with `http` passes through. All
/// other values are appended to the listing URL's origin as-is, so a path
/// without a leading `/` (`posts/1`) yields `https://example.composts/1`.
/// Existing report links depend on this exact joining.
pub fn absolutize(raw: &str, listing_url: &str) -> String {
    if raw.is_empty() || raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("{}{}", origin_of(listing_url), raw)
    }
}

/// Extract up to `max_articles` articles from `page`.
///
/// Elements matching `selectors.title` are taken in document order. Each
/// yields an [`Article`] whose title is the element's trimmed text and whose
/// URL is its `href` (resolved with [`absolutize`]), or empty if absent.
///
/// # Arguments
///
/// * `page` - The listing page HTML
/// * `selectors` - The competitor's selector set; only `title` is applied
/// * `source` - Competitor name stamped on every article
/// * `listing_url` - URL the page was fetched from, used to resolve relative links
/// * `max_articles` - Maximum number of matches to keep
///
/// # Returns
///
/// The articles in document order, at most `max_articles` of them.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidSelector`] if the title selector cannot be
/// parsed. A selector that matches nothing is not an error.
pub fn extract(
    page: &str,
    selectors: &SelectorSet,
    source: &str,
    listing_url: &str,
    max_articles: usize,
) -> Result<Vec<Article>, ExtractError> {
    let title_selector =
        Selector::parse(&selectors.title).map_err(|e| ExtractError::InvalidSelector {
            selector: selectors.title.clone(),
            reason: e.to_string(),
        })?;
    let document = Html::parse_document(page);

    let articles: Vec<Article> = document
        .select(&title_selector)
        .take(max_articles)
        .map(|element| {
            let title = element.text().collect::<String>().trim().to_string();
            let raw_url = element.value().attr("href").unwrap_or_default();
            Article::captured_now(title, absolutize(raw_url, listing_url), source)
        })
        .collect();

    if articles.is_empty() {
        warn!(%source, selector = %selectors.title, "Title selector matched nothing");
        debug!(%source, page_preview = %truncate_for_log(page, 300), "Unmatched page");
    } else {
        debug!(%source, count = articles.len(), "Extracted articles");
    }
    Ok(articles)
}
