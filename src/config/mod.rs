//! Configuration module for docfold
//!
//! Handles loading, parsing, and validating the TOML framework configuration:
//! per-framework detection patterns, selector fallback chains, strip-tag
//! lists, and link-following rules. The store is read-only after load and is
//! shared freely across the classifier and extractor.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CacheConfig, Config, CrawlConfig, FrameworkConfig, LinkFollowStrategy, LinkRules,
    OutputConfig, PatternSet, SelectorSet, UNKNOWN_FRAMEWORK,
};

// Re-export parser functions
pub use parser::{builtin_config, load_config};
