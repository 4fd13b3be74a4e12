use serde::Deserialize;
use std::sync::LazyLock;

/// Framework name used as the terminal classification fallback
pub const UNKNOWN_FRAMEWORK: &str = "unknown";

/// Main configuration structure for docfold
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(rename = "framework")]
    pub frameworks: Vec<FrameworkConfig>,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlConfig {
    /// Maximum depth to follow links from the seed URL
    pub max_depth: u32,

    /// Maximum number of pages to process in one run
    pub max_pages: u32,

    /// Fixed delay between consecutive fetches (milliseconds)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Number of retries for 5xx responses and timeouts
    #[serde(default = "default_retry_times")]
    pub retry_times: u32,

    /// User-Agent strings, rotated across requests
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Root directory for persisted Markdown documents
    pub output_dir: String,

    /// Directory for the raw-HTML side cache
    pub cache_dir: String,
}

/// Crawl cache behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CacheConfig {
    /// Master switch for the URL-keyed crawl cache
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Preload the cache from previously persisted documents.
    /// Off by default: cached bodies are Markdown, which defeats
    /// HTML-based framework detection on replay.
    #[serde(default)]
    pub preload_from_output: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            enabled: true,
            preload_from_output: false,
        }
    }
}

/// Per-framework configuration entry
///
/// Entry order in the config file defines detection priority: the classifier
/// tests frameworks in the order they appear here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FrameworkConfig {
    /// Framework name, e.g. "sphinx" or the sentinel "unknown"
    pub name: String,

    #[serde(default)]
    pub patterns: PatternSet,

    #[serde(default)]
    pub selectors: SelectorSet,

    /// Tag names removed (with their descendants) before Markdown conversion
    #[serde(default)]
    pub strip_tags: Vec<String>,

    #[serde(default)]
    pub link_rules: LinkRules,
}

/// Detection patterns for one framework, all matched by substring containment
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PatternSet {
    /// Matched against the page's domain and path
    #[serde(default)]
    pub url: Vec<String>,

    /// Matched against the lower-cased page body
    #[serde(default)]
    pub html: Vec<String>,

    /// Matched against the generator and theme meta tags
    #[serde(default)]
    pub meta: Vec<String>,
}

/// CSS selector fallback chains for one framework
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SelectorSet {
    /// Tried in order; first non-empty text wins
    #[serde(default)]
    pub title: Vec<String>,

    /// Tried in order; first selector yielding an HTML fragment wins
    #[serde(default)]
    pub content: Vec<String>,

    /// Every selector contributes its first text match
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Link-following rules for one framework, consumed by the crawl loop
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LinkRules {
    /// Regex patterns a link must match to be followed (empty = follow all)
    #[serde(default)]
    pub allow: Vec<String>,

    /// Regex patterns that exclude a link; takes precedence over allow
    #[serde(default)]
    pub deny: Vec<String>,

    /// How links are discovered on pages of this framework
    #[serde(default)]
    pub strategy: LinkFollowStrategy,
}

/// Link discovery semantics
///
/// Most generators emit ordinary anchors; single-page frameworks like Docsify
/// route through `#/path` fragments, which need to be treated as page URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkFollowStrategy {
    /// Follow ordinary `a[href]` links; fragment-only anchors are skipped
    #[default]
    HtmlLinks,

    /// Additionally follow `#/route` fragment links as distinct pages
    AnchorRoutes,
}

static FALLBACK_UNKNOWN: LazyLock<FrameworkConfig> = LazyLock::new(|| FrameworkConfig {
    name: UNKNOWN_FRAMEWORK.to_string(),
    ..FrameworkConfig::default()
});

impl Config {
    /// Resolves a framework name to its configuration entry.
    ///
    /// Unrecognized names resolve to the `unknown` entry rather than failing;
    /// a validated config always contains one.
    pub fn framework(&self, name: &str) -> &FrameworkConfig {
        self.frameworks
            .iter()
            .find(|f| f.name == name)
            .or_else(|| {
                self.frameworks
                    .iter()
                    .find(|f| f.name == UNKNOWN_FRAMEWORK)
            })
            .unwrap_or_else(|| &*FALLBACK_UNKNOWN)
    }

    /// Names of all configured frameworks, in detection priority order
    pub fn framework_names(&self) -> impl Iterator<Item = &str> {
        self.frameworks.iter().map(|f| f.name.as_str())
    }
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_retry_times() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

fn default_user_agents() -> Vec<String> {
    vec![
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config(frameworks: Vec<FrameworkConfig>) -> Config {
        Config {
            crawl: CrawlConfig {
                max_depth: 2,
                max_pages: 100,
                delay_ms: 0,
                retry_times: 0,
                user_agents: default_user_agents(),
            },
            output: OutputConfig {
                output_dir: "./output".to_string(),
                cache_dir: "./cache".to_string(),
            },
            cache: CacheConfig::default(),
            frameworks,
        }
    }

    fn named(name: &str) -> FrameworkConfig {
        FrameworkConfig {
            name: name.to_string(),
            ..FrameworkConfig::default()
        }
    }

    #[test]
    fn test_framework_lookup_by_name() {
        let config = minimal_config(vec![named("sphinx"), named("unknown")]);
        assert_eq!(config.framework("sphinx").name, "sphinx");
    }

    #[test]
    fn test_framework_lookup_falls_back_to_unknown() {
        let config = minimal_config(vec![named("sphinx"), named("unknown")]);
        assert_eq!(config.framework("gitbook").name, "unknown");
    }

    #[test]
    fn test_framework_lookup_without_unknown_entry() {
        // Unvalidated config; the lookup must still not panic
        let config = minimal_config(vec![named("sphinx")]);
        assert_eq!(config.framework("gitbook").name, "unknown");
    }

    #[test]
    fn test_framework_names_preserve_order() {
        let config = minimal_config(vec![named("mkdocs"), named("sphinx"), named("unknown")]);
        let names: Vec<&str> = config.framework_names().collect();
        assert_eq!(names, vec!["mkdocs", "sphinx", "unknown"]);
    }

    #[test]
    fn test_cache_config_defaults() {
        let cache = CacheConfig::default();
        assert!(cache.enabled);
        assert!(!cache.preload_from_output);
    }

    #[test]
    fn test_link_strategy_default() {
        assert_eq!(LinkFollowStrategy::default(), LinkFollowStrategy::HtmlLinks);
    }
}
