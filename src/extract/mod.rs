//! Selector-driven content extraction
//!
//! Resolves a page against its framework's selector fallback chains to
//! produce a title, a tag set, and the main content converted to Markdown
//! with every reference rewritten to absolute form.

mod markdown;

pub use markdown::convert_to_markdown;

use crate::config::FrameworkConfig;
use crate::page::PageDocument;
use crate::url::{absolutize_html, absolutize_markdown};
use std::collections::BTreeSet;
use tracing::debug;

/// Extraction result for one page
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// Page title; absent when no selector and no `og:title` meta matched
    pub title: Option<String>,

    /// Deduplicated tag set; insertion order is not significant
    pub tags: BTreeSet<String>,

    /// Main content as Markdown; empty when no content selector matched
    pub content: String,
}

/// Extracts title, tags, and Markdown content from a page
///
/// Selector failures on any one field never abort extraction of the others.
pub fn extract_document(page: &PageDocument, fw: &FrameworkConfig) -> ExtractedContent {
    ExtractedContent {
        title: extract_title(page, fw),
        tags: extract_tags(page, fw),
        content: extract_content(page, fw),
    }
}

/// Title extraction: first selector in the chain with non-empty text wins,
/// then the `og:title` meta attribute, then absent
fn extract_title(page: &PageDocument, fw: &FrameworkConfig) -> Option<String> {
    for selector in &fw.selectors.title {
        if let Some(title) = page.first_text(selector) {
            return Some(title);
        }
    }

    page.meta_property("og:title")
}

/// Tag extraction: union of per-selector first matches, comma-split
/// `keywords`, and all `og:article:tag` values; empties dropped
fn extract_tags(page: &PageDocument, fw: &FrameworkConfig) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();

    // Every tag selector contributes its first match; the chain does not
    // stop at the first success.
    for selector in &fw.selectors.tags {
        if let Some(tag) = page.first_text(selector) {
            tags.insert(tag);
        }
    }

    if let Some(keywords) = page.meta_name("keywords") {
        for keyword in keywords.split(',') {
            let keyword = keyword.trim();
            if !keyword.is_empty() {
                tags.insert(keyword.to_string());
            }
        }
    }

    for tag in page.meta_property_all("og:article:tag") {
        tags.insert(tag);
    }

    tags
}

/// Content extraction: the first content selector yielding an HTML fragment
/// wins; the fragment is absolutized, converted, and absolutized again on
/// the Markdown side. No selector matching is a defined no-content outcome.
fn extract_content(page: &PageDocument, fw: &FrameworkConfig) -> String {
    let fragment = fw
        .selectors
        .content
        .iter()
        .find_map(|selector| page.first_html(selector));

    let Some(fragment) = fragment else {
        debug!(url = %page.url(), framework = %fw.name, "no content selector matched");
        return String::new();
    };

    let absolute_html = absolutize_html(&fragment, page.url());
    let markdown = convert_to_markdown(&absolute_html, &fw.strip_tags);
    absolutize_markdown(&markdown, page.url())
}
