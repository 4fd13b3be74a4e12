//! Output handling for docfold
//!
//! Assembles extracted pages into front-matter Markdown documents, derives
//! deterministic output paths from URLs, persists documents, and tracks
//! run statistics for the end-of-run summary report.

mod document;
mod front_matter;
mod stats;

pub use document::{output_path, write_document, DocPage};
pub use front_matter::{parse_front_matter, render_front_matter, DocMetadata};
pub use stats::RunStats;
