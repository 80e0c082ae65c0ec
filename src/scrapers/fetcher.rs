//! HTTP retrieval of listing pages.
//!
//! [`Fetch`] is the seam between the scraper and the network: the
//! aggregator only needs "give me the body of this URL or tell me why not".
//! [`HttpFetcher`] is the production implementation backed by a single
//! `reqwest::Client` that is built once and reused for every competitor.

use reqwest::Client;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// User agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; CompetitorTracker/1.0)";

/// Per-request timeout used by the default fetcher.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a listing page could not be retrieved.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request did not finish within the client timeout.
    Timeout(String),
    /// Transport-level failure (DNS, TLS, connection reset, bad body, ...).
    Http(String),
    /// The server answered with a non-2xx status.
    Status(u16, String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout(url) => write!(f, "timed out fetching {}", url),
            Self::Http(msg) => write!(f, "HTTP error: {}", msg),
            Self::Status(code, url) => write!(f, "HTTP {} for {}", code, url),
        }
    }
}

impl std::error::Error for FetchError {}

/// Something that can retrieve the body of a page.
pub trait Fetch {
    /// Fetch `url` and return its decoded body.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Network-backed [`Fetch`] with a fixed client identity.
///
/// The client is read-only after construction and is used sequentially; it
/// is not meant to be shared across parallel fetches.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetcher with the standard 10 second timeout.
    pub fn with_default_timeout() -> Result<Self, FetchError> {
        Self::new(DEFAULT_TIMEOUT)
    }
}

fn classify(err: reqwest::Error, url: &str) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else {
        FetchError::Http(err.to_string())
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(e, url))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Listing page returned non-success status");
            return Err(FetchError::Status(status.as_u16(), url.to_string()));
        }

        let body = response.text().await.map_err(|e| classify(e, url))?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched listing page"
        );
        Ok(body)
    }
}
