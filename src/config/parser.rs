use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Default framework configuration shipped with the crate
const BUILTIN_CONFIG: &str = include_str!("../../framework_config.toml");

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use docfold::config::load_config;
///
/// let config = load_config(Path::new("framework_config.toml")).unwrap();
/// println!("Frameworks: {}", config.frameworks.len());
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Returns the builtin configuration embedded in the binary
///
/// Covers the six documentation frameworks the original corpus supports
/// (readthedocs, rbook, mkdocs, sphinx, teadocs, docsify) plus the
/// mandatory `unknown` fallback entry.
pub fn builtin_config() -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(BUILTIN_CONFIG)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const VALID_CONFIG: &str = r#"
[crawl]
max-depth = 3
max-pages = 500

[output]
output-dir = "./output"
cache-dir = "./cache"

[[framework]]
name = "sphinx"
patterns = { html = ["sphinxsidebar"], meta = ["sphinx"] }
selectors = { title = [".document h1"], content = [".document .body"] }
strip-tags = ["script", "style"]

[[framework]]
name = "unknown"
selectors = { title = ["h1", "title"], content = ["article", "main"] }
"#;

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawl.max_depth, 3);
        assert_eq!(config.crawl.max_pages, 500);
        // Defaults kick in for fields the file omits
        assert_eq!(config.crawl.delay_ms, 1000);
        assert_eq!(config.crawl.retry_times, 3);
        assert!(!config.crawl.user_agents.is_empty());

        assert_eq!(config.frameworks.len(), 2);
        let sphinx = config.framework("sphinx");
        assert_eq!(sphinx.patterns.html, vec!["sphinxsidebar"]);
        assert_eq!(sphinx.selectors.title, vec![".document h1"]);
        assert_eq!(sphinx.strip_tags, vec!["script", "style"]);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/framework_config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_missing_unknown_entry() {
        let config_content = r#"
[crawl]
max-depth = 3
max-pages = 500

[output]
output-dir = "./output"
cache-dir = "./cache"

[[framework]]
name = "sphinx"
"#;
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_builtin_config_is_valid() {
        let config = builtin_config().unwrap();
        assert!(config.frameworks.len() >= 2);
        assert_eq!(config.framework("unknown").name, "unknown");
        // The builtin set covers the frameworks from the source corpus
        for name in ["readthedocs", "mkdocs", "sphinx", "docsify"] {
            assert_eq!(config.framework(name).name, name);
        }
    }
}
