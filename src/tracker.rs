//! The daily scrape: aggregate, render, persist.

use crate::config::TrackerConfig;
use crate::outputs::{json, markdown, report};
use crate::scrapers::{aggregate_all, Fetch};
use chrono::NaiveDate;
use itertools::Itertools;
use std::error::Error;
use std::path::PathBuf;
use tracing::{error, info, instrument};

/// Where a run writes its artifacts.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Directory for the Markdown report.
    pub report_dir: PathBuf,
    /// Directory for the JSON digest; `None` skips it.
    pub json_dir: Option<PathBuf>,
}

/// What a completed run produced.
#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    /// Nothing was scraped, so nothing was written.
    NoArticles,
    /// A report was written.
    Written {
        path: PathBuf,
        total_articles: usize,
        sources: usize,
    },
}

/// Run one complete scrape for `report_date`.
///
/// # Arguments
///
/// * `fetcher` - Retrieves listing pages
/// * `config` - Competitors and settings for this run
/// * `output` - Where the Markdown report and optional JSON digest go
/// * `report_date` - Calendar day the report is filed under
///
/// # Returns
///
/// [`RunOutcome::NoArticles`] if nothing was scraped (no file is written),
/// otherwise [`RunOutcome::Written`] with the report path and counts.
///
/// # Errors
///
/// Only a failure to write the Markdown report is returned; per-competitor
/// failures are absorbed by the aggregator and a failed JSON digest is
/// logged.
#[instrument(level = "info", skip_all, fields(%report_date))]
pub async fn run_daily_scrape<F: Fetch>(
    fetcher: &F,
    config: &TrackerConfig,
    output: &OutputOptions,
    report_date: NaiveDate,
) -> Result<RunOutcome, Box<dyn Error>> {
    info!("Starting daily competitive intelligence scrape");

    let articles = aggregate_all(fetcher, config).await;
    if articles.is_empty() {
        return Ok(RunOutcome::NoArticles);
    }

    let md = markdown::render_report(&articles, report_date);
    let path = report::write_report(&output.report_dir, &md, report_date).await?;

    if let Some(json_dir) = &output.json_dir {
        if let Err(e) = json::write_digest(json_dir, &articles, report_date).await {
            error!(error = %e, "Failed to write JSON digest");
        }
    }

    Ok(RunOutcome::Written {
        path,
        total_articles: articles.len(),
        sources: articles.iter().map(|a| a.source.as_str()).unique().count(),
    })
}
