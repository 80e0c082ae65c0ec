//! Persistence of the Markdown digest.

use super::report_stem;
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `content` to `{output_dir}/ai_competitive_report_{date}.md`.
///
/// The directory is created if needed. An existing report for the same day
/// is overwritten.
///
/// # Arguments
///
/// * `output_dir` - Directory that holds the daily reports
/// * `content` - The rendered Markdown
/// * `report_date` - Day the report covers; it names the file
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), %report_date))]
pub async fn write_report(
    output_dir: &Path,
    content: &str,
    report_date: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(error = %e, "Failed to create report directory");
        return Err(e.into());
    }

    let path = output_dir.join(format!("{}.md", report_stem(report_date)));
    fs::write(&path, content).await?;
    info!(path = %path.display(), bytes = content.len(), "Report saved");
    Ok(path)
}
