//! Crawl engine for docfold
//!
//! The boundary layer around the extraction core: an HTTP fetcher with
//! User-Agent rotation and retry, link discovery driven by per-framework
//! allow/deny rules, and the run coordinator that walks a site breadth-first
//! and pushes every page through the classify/extract/persist pipeline.

mod coordinator;
mod fetcher;
mod links;

pub use coordinator::{crawl, Coordinator};
pub use fetcher::Fetcher;
pub use links::extract_links;
