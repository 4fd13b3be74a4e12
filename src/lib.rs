//! Docfold: a documentation site harvester
//!
//! This crate crawls documentation websites built on heterogeneous static-site
//! generators (ReadTheDocs, MkDocs, Sphinx, Docsify, and others), detects which
//! generator produced each page, extracts the main content through per-framework
//! selector chains, and persists every page as Markdown with YAML front matter.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod detect;
pub mod extract;
pub mod output;
pub mod page;
pub mod url;

use thiserror::Error;

/// Main error type for docfold operations
#[derive(Debug, Error)]
pub enum DocfoldError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Non-HTML response for {url}: {content_type}")]
    NotHtml { url: String, content_type: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid CSS selector '{selector}' in framework '{framework}'")]
    InvalidSelector { framework: String, selector: String },

    #[error("Invalid link rule '{pattern}' in framework '{framework}': {message}")]
    InvalidLinkRule {
        framework: String,
        pattern: String,
        message: String,
    },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for docfold operations
pub type Result<T> = std::result::Result<T, DocfoldError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use cache::CrawlCache;
pub use config::{Config, FrameworkConfig};
pub use detect::{DomainCache, FrameworkDetector};
pub use extract::extract_document;
pub use page::{PageDocument, PageResponse};
