//! # Competitor Tracker
//!
//! Fetches competitor blog listing pages, pulls article headlines out with
//! per-site CSS selectors, and writes a dated Markdown digest.
//!
//! ## Usage
//!
//! ```sh
//! competitor_tracker
//! ```
//!
//! ## Architecture
//!
//! 1. **Config**: load competitors and settings (or the built-in defaults)
//! 2. **Scrape**: fetch each listing page in turn and extract articles;
//!    a failing site contributes nothing and the run continues
//! 3. **Report**: group articles by competitor and render Markdown
//! 4. **Persist**: write `reports/ai_competitive_report_<date>.md`

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod models;
mod outputs;
mod scrapers;
mod tracker;
mod utils;

use cli::Cli;
use scrapers::HttpFetcher;
use tracker::{OutputOptions, RunOutcome};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("competitor_tracker starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.output_dir, ?args.json_output_dir, "Parsed CLI arguments");

    let config = config::load_config(&args.config).await?;
    let fetcher = HttpFetcher::with_default_timeout()?;
    let output = OutputOptions {
        report_dir: args.output_dir,
        json_dir: args.json_output_dir,
    };

    let outcome = tracker::run_daily_scrape(&fetcher, &config, &output, utils::today()).await?;
    match outcome {
        RunOutcome::Written {
            path,
            total_articles,
            sources,
        } => {
            info!("Daily scrape completed successfully!");
            info!(path = %path.display(), "Report saved: {}", path.display());
            info!(total_articles, sources, "Total articles found: {}", total_articles);
        }
        RunOutcome::NoArticles => {
            info!("No articles found during scraping.");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
