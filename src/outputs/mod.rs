//! Report rendering and persistence.
//!
//! # Submodules
//!
//! - [`markdown`]: Renders collected articles into the Markdown digest
//! - [`report`]: Writes the digest to its dated path
//! - [`json`]: Optionally writes the same run as a JSON document
//!
//! # Output Structure
//!
//! ```text
//! reports/
//! └── ai_competitive_report_2025-05-06.md
//!
//! json_output_dir/
//! └── ai_competitive_report_2025-05-06.json
//! ```
//!
//! One file per calendar day; a rerun on the same day replaces it.

use chrono::NaiveDate;

pub mod json;
pub mod markdown;
pub mod report;

/// File stem shared by every artifact of the run for `date`.
pub fn report_stem(date: NaiveDate) -> String {
    format!("ai_competitive_report_{}", date.format("%Y-%m-%d"))
}
