//! Command-line interface definitions.
//!
//! Every option has a default, so running the binary with no arguments
//! performs the standard daily scrape. Options can also come from the
//! environment.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the competitor tracker.
///
/// # Examples
///
/// ```sh
/// # Default run: ./config.json (or built-in competitors), reports/ output
/// competitor_tracker
///
/// # Custom config and an extra JSON copy
/// competitor_tracker -c competitors.yaml -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the competitor configuration (JSON, or YAML by extension)
    #[arg(short, long, env = "TRACKER_CONFIG", default_value = "config.json")]
    pub config: PathBuf,

    /// Output directory for the Markdown report
    #[arg(short, long, env = "TRACKER_OUTPUT_DIR", default_value = "reports")]
    pub output_dir: PathBuf,

    /// Optional output directory for a JSON copy of the report
    #[arg(short, long, env = "TRACKER_JSON_OUTPUT_DIR")]
    pub json_output_dir: Option<PathBuf>,
}
