//! Competitor configuration loading and validation.
//!
//! The configuration document maps each competitor's display name to its
//! listing page and selector set, plus two global settings:
//!
//! ```json
//! {
//!   "competitors": {
//!     "OpenAI": {
//!       "blog_url": "https://openai.com/blog",
//!       "selectors": { "title": "h3 a", "date": ".published-date", "summary": ".excerpt" }
//!     }
//!   },
//!   "max_articles": 5,
//!   "delay_between_requests": 2
//! }
//! ```
//!
//! JSON is the default format; files ending in `.yaml`/`.yml` are read with
//! `serde_yaml`. The key order of `competitors` is kept because it decides
//! the section order of the report.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument, warn};
use url::Url;

const DEFAULT_MAX_ARTICLES: usize = 5;
const DEFAULT_DELAY_SECS: f64 = 2.0;

/// CSS selectors used to locate article fields on one listing page.
///
/// Only `title` drives extraction today; `date` and `summary` are carried
/// through so configurations can already declare them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectorSet {
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
}

/// One tracked competitor.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorConfig {
    /// Display name, unique within a configuration.
    pub name: String,
    /// Absolute URL of the blog listing page.
    pub listing_url: String,
    pub selectors: SelectorSet,
}

/// Run-wide scraping settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Upper bound on articles taken from a single listing page.
    pub max_articles_per_site: usize,
    /// Pause between two consecutive competitors, in seconds.
    pub inter_request_delay_secs: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_articles_per_site: DEFAULT_MAX_ARTICLES,
            inter_request_delay_secs: DEFAULT_DELAY_SECS,
        }
    }
}

impl Settings {
    /// The pause between competitors as a [`Duration`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the delay is negative, NaN, or
    /// too large to represent.
    pub fn pacing_delay(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(self.inter_request_delay_secs).map_err(|e| {
            ConfigError::Invalid(format!(
                "delay_between_requests must be a non-negative number of seconds, got {}: {}",
                self.inter_request_delay_secs, e
            ))
        })
    }
}

/// A fully loaded configuration: competitors in document order plus settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub competitors: Vec<CompetitorConfig>,
    pub settings: Settings,
}

impl Default for TrackerConfig {
    /// The built-in fallback used when no configuration file exists.
    fn default() -> Self {
        Self {
            competitors: vec![
                CompetitorConfig {
                    name: "OpenAI".to_string(),
                    listing_url: "https://openai.com/blog".to_string(),
                    selectors: SelectorSet {
                        title: "h3 a".to_string(),
                        date: ".published-date".to_string(),
                        summary: ".excerpt".to_string(),
                    },
                },
                CompetitorConfig {
                    name: "Google AI".to_string(),
                    listing_url: "https://ai.googleblog.com/".to_string(),
                    selectors: SelectorSet {
                        title: ".post-title a".to_string(),
                        date: ".published".to_string(),
                        summary: ".post-body".to_string(),
                    },
                },
            ],
            settings: Settings::default(),
        }
    }
}

/// Reasons a configuration document is rejected.
#[derive(Debug)]
pub enum ConfigError {
    /// The document could not be parsed.
    Malformed(String),
    /// The document parsed but holds values the scraper cannot run with.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(msg) => write!(f, "malformed configuration: {}", msg),
            Self::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl Error for ConfigError {}

/// On-disk shape of the configuration document.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(deserialize_with = "ordered_competitors")]
    competitors: Vec<CompetitorConfig>,
    #[serde(default = "default_max_articles")]
    max_articles: usize,
    #[serde(default = "default_delay")]
    delay_between_requests: f64,
}

#[derive(Debug, Deserialize)]
struct CompetitorEntry {
    blog_url: String,
    selectors: SelectorSet,
}

fn default_max_articles() -> usize {
    DEFAULT_MAX_ARTICLES
}

fn default_delay() -> f64 {
    DEFAULT_DELAY_SECS
}

/// Deserialize the `competitors` map into a vector, keeping key order.
fn ordered_competitors<'de, D>(deserializer: D) -> Result<Vec<CompetitorConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CompetitorsVisitor;

    impl<'de> Visitor<'de> for CompetitorsVisitor {
        type Value = Vec<CompetitorConfig>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map from competitor name to its listing page and selectors")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut competitors: Vec<CompetitorConfig> =
                Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, entry)) = map.next_entry::<String, CompetitorEntry>()? {
                if competitors.iter().any(|c| c.name == name) {
                    return Err(de::Error::custom(format!("duplicate competitor `{}`", name)));
                }
                competitors.push(CompetitorConfig {
                    name,
                    listing_url: entry.blog_url,
                    selectors: entry.selectors,
                });
            }
            Ok(competitors)
        }
    }

    deserializer.deserialize_map(CompetitorsVisitor)
}

impl TrackerConfig {
    /// Parse a JSON configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            serde_json::from_str(raw).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        Self::from_file(file)
    }

    /// Parse a YAML configuration document.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            serde_yaml::from_str(raw).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        Self::from_file(file)
    }

    fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let config = Self {
            competitors: file.competitors,
            settings: Settings {
                max_articles_per_site: file.max_articles,
                inter_request_delay_secs: file.delay_between_requests,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Check settings ranges and that every listing URL is absolute http(s).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settings.max_articles_per_site == 0 {
            return Err(ConfigError::Invalid(
                "max_articles must be at least 1".to_string(),
            ));
        }
        self.settings.pacing_delay()?;
        for competitor in &self.competitors {
            match Url::parse(&competitor.listing_url) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "competitor `{}` has a listing URL that is not absolute http(s): {}",
                        competitor.name, competitor.listing_url
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Load the configuration at `path`, falling back to the built-in default
/// when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed, or
/// validated.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_config(path: &Path) -> Result<TrackerConfig, Box<dyn Error>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config file not found; using default settings");
            return Ok(TrackerConfig::default());
        }
        Err(e) => return Err(Box::new(e)),
    };

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let config = if is_yaml {
        TrackerConfig::from_yaml_str(&raw)?
    } else {
        TrackerConfig::from_json_str(&raw)?
    };

    info!(
        competitors = config.competitors.len(),
        max_articles = config.settings.max_articles_per_site,
        delay_secs = config.settings.inter_request_delay_secs,
        "Loaded configuration"
    );
    Ok(config)
}
