use crate::config::types::{Config, CrawlConfig, FrameworkConfig, UNKNOWN_FRAMEWORK};
use crate::ConfigError;
use regex::Regex;
use scraper::Selector;
use std::collections::HashSet;

/// Validates the entire configuration
///
/// Configuration errors are fatal at startup; nothing here is recoverable
/// mid-run.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_output_config(config)?;
    validate_frameworks(&config.frameworks)?;
    Ok(())
}

/// Validates crawl behavior settings
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.retry_times > 10 {
        return Err(ConfigError::Validation(format!(
            "retry_times must be <= 10, got {}",
            config.retry_times
        )));
    }

    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user_agents cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output locations
fn validate_output_config(config: &Config) -> Result<(), ConfigError> {
    if config.output.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    if config.output.cache_dir.is_empty() {
        return Err(ConfigError::Validation(
            "cache_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the framework table
///
/// Checks that names are unique and non-empty, that the mandatory `unknown`
/// entry exists, and that every selector and link rule actually parses.
fn validate_frameworks(frameworks: &[FrameworkConfig]) -> Result<(), ConfigError> {
    if frameworks.is_empty() {
        return Err(ConfigError::Validation(
            "at least one framework entry is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for fw in frameworks {
        if fw.name.is_empty() {
            return Err(ConfigError::Validation(
                "framework name cannot be empty".to_string(),
            ));
        }

        if !seen.insert(fw.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate framework entry '{}'",
                fw.name
            )));
        }

        validate_selectors(fw)?;
        validate_link_rules(fw)?;
    }

    if !seen.contains(UNKNOWN_FRAMEWORK) {
        return Err(ConfigError::Validation(format!(
            "mandatory '{}' framework entry is missing",
            UNKNOWN_FRAMEWORK
        )));
    }

    Ok(())
}

/// Checks that every configured CSS selector parses
fn validate_selectors(fw: &FrameworkConfig) -> Result<(), ConfigError> {
    let chains = [
        &fw.selectors.title,
        &fw.selectors.content,
        &fw.selectors.tags,
    ];

    for chain in chains {
        for selector in chain.iter() {
            if Selector::parse(selector).is_err() {
                return Err(ConfigError::InvalidSelector {
                    framework: fw.name.clone(),
                    selector: selector.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Checks that every allow/deny link rule compiles as a regex
fn validate_link_rules(fw: &FrameworkConfig) -> Result<(), ConfigError> {
    for pattern in fw.link_rules.allow.iter().chain(fw.link_rules.deny.iter()) {
        if let Err(e) = Regex::new(pattern) {
            return Err(ConfigError::InvalidLinkRule {
                framework: fw.name.clone(),
                pattern: pattern.clone(),
                message: e.to_string(),
            });
        }
    }

    Ok(())
}
