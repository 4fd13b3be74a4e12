use crate::config::{Config, UNKNOWN_FRAMEWORK};
use crate::detect::DomainCache;
use crate::page::PageDocument;
use crate::url::domain_and_path;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Classifies pages to documentation frameworks
///
/// Detection runs a strict cascade and the first match wins; there is no
/// scoring or combination of signals:
///
/// 1. URL patterns against the page's domain and path, memoized per domain
/// 2. HTML patterns against the lower-cased page body (never cached — body
///    evidence can vary page to page)
/// 3. The `generator` meta tag, then the `theme` meta tag
///
/// Classification never fails: pages matching nothing classify as `unknown`.
pub struct FrameworkDetector {
    config: Arc<Config>,
    cache: Arc<DomainCache>,
}

impl FrameworkDetector {
    /// Creates a detector over the given configuration store and domain cache
    ///
    /// The cache is injected by the run orchestrator so that runs (and tests)
    /// never share classification state.
    pub fn new(config: Arc<Config>, cache: Arc<DomainCache>) -> Self {
        FrameworkDetector { config, cache }
    }

    /// Detects the framework that produced a page
    ///
    /// Always returns a name present in the configuration store.
    pub fn detect(&self, page: &PageDocument) -> String {
        if let Some(framework) = self.detect_by_url(page.url()) {
            debug!(%framework, url = %page.url(), "detected by URL");
            return framework;
        }

        if let Some(framework) = self.detect_by_html(page.body()) {
            debug!(%framework, url = %page.url(), "detected by HTML");
            return framework;
        }

        if let Some(framework) = self.detect_by_meta(page) {
            debug!(%framework, url = %page.url(), "detected by meta tag");
            return framework;
        }

        debug!(url = %page.url(), "framework unknown");
        UNKNOWN_FRAMEWORK.to_string()
    }

    /// URL-pattern detection with the per-domain cache
    ///
    /// A cache hit short-circuits all further work for every subsequent page
    /// on that domain. This is a deliberate performance trade-off: one page
    /// matching another framework's URL pattern pins that classification for
    /// the whole domain until [`clear_cache`](Self::clear_cache).
    fn detect_by_url(&self, url: &Url) -> Option<String> {
        let (domain, path) = domain_and_path(url);
        if domain.is_empty() {
            return None;
        }

        if let Some(cached) = self.cache.get(&domain) {
            debug!(%domain, framework = %cached, "domain cache hit");
            return Some(cached);
        }

        for fw in &self.config.frameworks {
            for pattern in &fw.patterns.url {
                if domain.contains(pattern) || path.contains(pattern) {
                    self.cache.insert(&domain, &fw.name);
                    debug!(%domain, framework = %fw.name, "domain cached");
                    return Some(fw.name.clone());
                }
            }
        }

        None
    }

    /// HTML-pattern detection over the lower-cased body
    fn detect_by_html(&self, body: &str) -> Option<String> {
        let html = body.to_lowercase();

        for fw in &self.config.frameworks {
            for pattern in &fw.patterns.html {
                if html.contains(pattern) {
                    return Some(fw.name.clone());
                }
            }
        }

        None
    }

    /// Meta-tag detection: `generator` first, then `theme`
    fn detect_by_meta(&self, page: &PageDocument) -> Option<String> {
        for meta in [page.meta_name("generator"), page.meta_name("theme")] {
            let Some(content) = meta else { continue };
            let content = content.to_lowercase();

            for fw in &self.config.frameworks {
                for pattern in &fw.patterns.meta {
                    if content.contains(pattern) {
                        return Some(fw.name.clone());
                    }
                }
            }
        }

        None
    }

    /// Resets the domain cache globally
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
