//! URL handling module for docfold
//!
//! Provides domain extraction for classification and cache keys, plus the
//! two reference-rewriting passes: HTML attribute absolutization before
//! Markdown conversion and Markdown link absolutization after it. Both
//! passes are pure functions of `(content, base)` and are idempotent.

mod absolutize;
mod domain;

pub use absolutize::{absolutize_html, absolutize_markdown};
pub use domain::{domain_and_path, extract_domain};
