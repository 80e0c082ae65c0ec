//! JSON copy of a run for downstream tooling.
//!
//! Written next to the Markdown digest only when a JSON output directory is
//! configured. The document mirrors [`Digest`]:
//!
//! ```json
//! { "date": "2025-05-06", "total_articles": 2, "articles": [ ... ] }
//! ```

use super::report_stem;
use crate::models::{Article, Digest};
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `articles` to `{json_output_dir}/ai_competitive_report_{date}.json`.
///
/// # Errors
///
/// Returns an error if serialization, directory creation, or the write fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.display()))]
pub async fn write_digest(
    json_output_dir: &Path,
    articles: &[Article],
    report_date: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    let digest = Digest {
        date: report_date,
        total_articles: articles.len(),
        articles,
    };
    let json = serde_json::to_string_pretty(&digest)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = json_output_dir.join(format!("{}.json", report_stem(report_date)));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON digest");
    Ok(path)
}
