//! Sequential scraping of every configured competitor.
//!
//! Each competitor is scraped into an explicit `Result`. The caller folds
//! those results into one article list, so a single failing site costs its
//! own articles and nothing else.

use super::extractor::{extract, ExtractError};
use super::fetcher::{Fetch, FetchError};
use crate::config::{CompetitorConfig, Settings, TrackerConfig};
use crate::models::Article;
use std::fmt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Why one competitor contributed no articles.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeError {
    Fetch(FetchError),
    Extract(ExtractError),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "fetch failed: {}", e),
            Self::Extract(e) => write!(f, "extraction failed: {}", e),
        }
    }
}

impl std::error::Error for ScrapeError {}

impl From<FetchError> for ScrapeError {
    fn from(e: FetchError) -> Self {
        Self::Fetch(e)
    }
}

impl From<ExtractError> for ScrapeError {
    fn from(e: ExtractError) -> Self {
        Self::Extract(e)
    }
}

/// Fetch one competitor's listing page and extract its articles.
#[instrument(level = "info", skip_all, fields(competitor = %competitor.name))]
pub async fn scrape_competitor<F: Fetch>(
    fetcher: &F,
    competitor: &CompetitorConfig,
    settings: &Settings,
) -> Result<Vec<Article>, ScrapeError> {
    info!(url = %competitor.listing_url, "Scraping {}...", competitor.name);
    debug!(
        title = %competitor.selectors.title,
        date = %competitor.selectors.date,
        summary = %competitor.selectors.summary,
        "Selector set"
    );
    let page = fetcher.fetch(&competitor.listing_url).await?;
    let articles = extract(
        &page,
        &competitor.selectors,
        &competitor.name,
        &competitor.listing_url,
        settings.max_articles_per_site,
    )?;
    info!(count = articles.len(), "Found {} articles from {}", articles.len(), competitor.name);
    Ok(articles)
}

/// Scrape every competitor in configuration order and collect the articles.
///
/// Failures are logged and skipped. Consecutive competitors are separated by
/// `inter_request_delay_secs`; no pause follows the last one.
#[instrument(level = "info", skip_all, fields(competitors = config.competitors.len()))]
pub async fn aggregate_all<F: Fetch>(fetcher: &F, config: &TrackerConfig) -> Vec<Article> {
    let delay = match config.settings.pacing_delay() {
        Ok(delay) => delay,
        Err(e) => {
            warn!(error = %e, "Unusable pacing delay; scraping without pauses");
            Duration::ZERO
        }
    };
    let mut articles = Vec::new();
    let mut failed = 0usize;

    for (i, competitor) in config.competitors.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            sleep(delay).await;
        }

        match scrape_competitor(fetcher, competitor, &config.settings).await {
            Ok(found) => articles.extend(found),
            Err(e) => {
                failed += 1;
                error!(competitor = %competitor.name, error = %e, "Error scraping {}", competitor.name);
            }
        }
    }

    info!(
        succeeded = config.competitors.len() - failed,
        failed,
        total_articles = articles.len(),
        "Finished scraping competitors"
    );
    articles
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::SelectorSet;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory [`Fetch`] that serves canned pages and records requests.
    #[derive(Default)]
    pub(crate) struct StubFetcher {
        pages: HashMap<String, Result<String, FetchError>>,
        pub(crate) requested: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        pub(crate) fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), Ok(body.to_string()));
            self
        }

        pub(crate) fn failing(mut self, url: &str, err: FetchError) -> Self {
            self.pages.insert(url.to_string(), Err(err));
            self
        }
    }

    impl Fetch for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Status(404, url.to_string())))
        }
    }

    pub(crate) fn competitor(name: &str, url: &str, title: &str) -> CompetitorConfig {
        CompetitorConfig {
            name: name.to_string(),
            listing_url: url.to_string(),
            selectors: SelectorSet {
                title: title.to_string(),
                date: String::new(),
                summary: String::new(),
            },
        }
    }

    pub(crate) fn no_delay(competitors: Vec<CompetitorConfig>, max: usize) -> TrackerConfig {
        TrackerConfig {
            competitors,
            settings: Settings {
                max_articles_per_site: max,
                inter_request_delay_secs: 0.0,
            },
        }
    }

    #[tokio::test]
    async fn test_failed_competitor_is_isolated() {
        let fetcher = StubFetcher::default()
            .failing("https://a.test/blog", FetchError::Timeout("https://a.test/blog".to_string()))
            .page("https://b.test/blog", "<h3><a href=\"/one\">One</a></h3>");
        let config = no_delay(
            vec![
                competitor("A", "https://a.test/blog", "h3 a"),
                competitor("B", "https://b.test/blog", "h3 a"),
            ],
            5,
        );

        let articles = aggregate_all(&fetcher, &config).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source, "B");
        assert_eq!(articles[0].url, "https://b.test/one");
    }

    #[tokio::test]
    async fn test_invalid_selector_is_isolated() {
        let fetcher = StubFetcher::default()
            .page("https://a.test/", "<h3><a>x</a></h3>")
            .page("https://b.test/", "<h3><a>y</a></h3>");
        let config = no_delay(
            vec![
                competitor("A", "https://a.test/", "[[broken"),
                competitor("B", "https://b.test/", "h3 a"),
            ],
            5,
        );

        let articles = aggregate_all(&fetcher, &config).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "y");
    }

    #[tokio::test]
    async fn test_order_follows_config_then_page() {
        let fetcher = StubFetcher::default()
            .page("https://z.test/", "<a class=t>z1</a><a class=t>z2</a>")
            .page("https://a.test/", "<a class=t>a1</a>");
        let config = no_delay(
            vec![
                competitor("Zed", "https://z.test/", "a.t"),
                competitor("Ay", "https://a.test/", "a.t"),
            ],
            5,
        );

        let articles = aggregate_all(&fetcher, &config).await;
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["z1", "z2", "a1"]);
        assert_eq!(
            *fetcher.requested.borrow(),
            vec!["https://z.test/".to_string(), "https://a.test/".to_string()]
        );
    }

    #[tokio::test]
    async fn test_per_site_limit_applies_to_each_competitor() {
        let body = "<a class=t>1</a><a class=t>2</a><a class=t>3</a>";
        let fetcher = StubFetcher::default()
            .page("https://a.test/", body)
            .page("https://b.test/", body);
        let config = no_delay(
            vec![
                competitor("A", "https://a.test/", "a.t"),
                competitor("B", "https://b.test/", "a.t"),
            ],
            2,
        );

        let articles = aggregate_all(&fetcher, &config).await;
        assert_eq!(articles.iter().filter(|a| a.source == "A").count(), 2);
        assert_eq!(articles.iter().filter(|a| a.source == "B").count(), 2);
    }

    #[tokio::test]
    async fn test_scrape_competitor_reports_fetch_error() {
        let fetcher = StubFetcher::default();
        let result = scrape_competitor(
            &fetcher,
            &competitor("A", "https://a.test/", "a"),
            &Settings::default(),
        )
        .await;
        assert!(matches!(result, Err(ScrapeError::Fetch(FetchError::Status(404, _)))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_between_competitors() {
        let fetcher = StubFetcher::default()
            .page("https://a.test/", "<a>1</a>")
            .page("https://b.test/", "<a>2</a>")
            .page("https://c.test/", "<a>3</a>");
        let config = TrackerConfig {
            competitors: vec![
                competitor("A", "https://a.test/", "a"),
                competitor("B", "https://b.test/", "a"),
                competitor("C", "https://c.test/", "a"),
            ],
            settings: Settings {
                max_articles_per_site: 5,
                inter_request_delay_secs: 2.0,
            },
        };

        let start = tokio::time::Instant::now();
        let articles = aggregate_all(&fetcher, &config).await;
        assert_eq!(articles.len(), 3);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(4));
        assert!(elapsed < Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_applies_after_failed_competitor() {
        let fetcher = StubFetcher::default()
            .failing("https://a.test/", FetchError::Http("connection reset".to_string()))
            .page("https://b.test/", "<a>after</a>");
        let config = TrackerConfig {
            competitors: vec![
                competitor("A", "https://a.test/", "a"),
                competitor("B", "https://b.test/", "a"),
            ],
            settings: Settings {
                max_articles_per_site: 5,
                inter_request_delay_secs: 3.0,
            },
        };

        let start = tokio::time::Instant::now();
        let articles = aggregate_all(&fetcher, &config).await;
        let elapsed = start.elapsed();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source, "B");
        assert!(elapsed >= Duration::from_secs(3));
        assert!(elapsed < Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_applies_after_empty_competitor() {
        let fetcher = StubFetcher::default()
            .page("https://a.test/", "<p>nothing matches</p>")
            .page("https://b.test/", "<a>found</a>");
        let config = TrackerConfig {
            competitors: vec![
                competitor("A", "https://a.test/", "a"),
                competitor("B", "https://b.test/", "a"),
            ],
            settings: Settings {
                max_articles_per_site: 5,
                inter_request_delay_secs: 3.0,
            },
        };

        let start = tokio::time::Instant::now();
        let articles = aggregate_all(&fetcher, &config).await;

        assert_eq!(articles.len(), 1);
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_unrepresentable_delay_does_not_panic() {
        let fetcher = StubFetcher::default()
            .page("https://a.test/", "<a>1</a>")
            .page("https://b.test/", "<a>2</a>");
        let mut config = no_delay(
            vec![
                competitor("A", "https://a.test/", "a"),
                competitor("B", "https://b.test/", "a"),
            ],
            5,
        );
        config.settings.inter_request_delay_secs = 1e20;

        let articles = aggregate_all(&fetcher, &config).await;
        assert_eq!(articles.len(), 2);
    }
}
