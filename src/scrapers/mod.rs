//! Competitor listing-page scraping.
//!
//! Scraping is split into three stages, each in its own module:
//!
//! | Stage | Module | Role |
//! |-------|--------|------|
//! | Fetch | [`fetcher`] | Download a listing page (`reqwest`, fixed user agent, 10 s timeout) |
//! | Extract | [`extractor`] | Apply a competitor's title selector and normalize links |
//! | Aggregate | [`aggregator`] | Visit competitors in order, isolate failures, pace requests |
//!
//! Every competitor goes through the same generic code path; only its
//! [`crate::config::SelectorSet`] differs.

pub mod aggregator;
pub mod extractor;
pub mod fetcher;

pub use aggregator::aggregate_all;
pub use fetcher::{Fetch, HttpFetcher};
