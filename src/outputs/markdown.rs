//! Markdown rendering of a run's articles.
//!
//! # Layout
//!
//! ```text
//! # AI Competitive Intelligence Report
//! **Date**: 2025-05-06
//! **Articles Found**: 3
//!
//! ## Summary
//! ...
//!
//! ## Acme (2 articles)
//!
//! ### Headline
//! **Link**: [https://acme.test/p](https://acme.test/p)
//! **Scraped**: 2025-05-06T09:00:00.000000
//! ```
//!
//! Sections follow the order in which each source first appears in the
//! input, not alphabetical order. Output depends only on the articles and
//! the date, so rendering the same input twice gives identical bytes.

use crate::models::Article;
use chrono::NaiveDate;
use itertools::Itertools;

const REPORT_TITLE: &str = "AI Competitive Intelligence Report";
const SUMMARY_BLURB: &str =
    "This report contains the latest updates from key AI companies and competitors.";

/// Partition `articles` by source, keeping first-seen source order and the
/// relative order of articles within each source.
pub fn group_by_source(articles: &[Article]) -> Vec<(&str, Vec<&Article>)> {
    articles
        .iter()
        .map(|a| a.source.as_str())
        .unique()
        .map(|source| {
            let members: Vec<&Article> = articles.iter().filter(|a| a.source == source).collect();
            (source, members)
        })
        .collect()
}

/// Render the digest for `report_date`.
///
/// Callers skip rendering entirely when `articles` is empty.
pub fn render_report(articles: &[Article], report_date: NaiveDate) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n", REPORT_TITLE));
    md.push_str(&format!("**Date**: {}\n", report_date.format("%Y-%m-%d")));
    md.push_str(&format!("**Articles Found**: {}\n\n", articles.len()));
    md.push_str("## Summary\n");
    md.push_str(SUMMARY_BLURB);
    md.push_str("\n\n");

    for (source, group) in group_by_source(articles) {
        md.push_str(&format!("## {} ({} articles)\n\n", source, group.len()));

        for article in group {
            md.push_str(&format!("### {}\n", article.title));
            if !article.url.is_empty() {
                md.push_str(&format!("**Link**: [{0}]({0})\n", article.url));
            }
            md.push_str(&format!("**Scraped**: {}\n\n", article.scraped_at_iso()));
        }
    }

    md
}
