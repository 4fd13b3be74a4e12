use crate::cache::CrawlCache;
use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::links::extract_links;
use crate::detect::{DomainCache, FrameworkDetector};
use crate::extract::extract_document;
use crate::output::{write_document, DocPage, RunStats};
use crate::page::{PageDocument, PageResponse};
use crate::url::extract_domain;
use crate::{Result, UrlError};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Orchestrates one crawl run
///
/// Owns the crawl cache and the domain cache for the run: the configuration
/// store is shared read-only, while per-run state never leaks across runs.
/// Per-page failures are logged and recovered; only startup errors abort.
pub struct Coordinator {
    config: Arc<Config>,
    detector: FrameworkDetector,
    fetcher: Fetcher,
    cache: CrawlCache,
    stats: RunStats,
}

impl Coordinator {
    /// Prepares a run: builds the fetcher, wires the domain cache into the
    /// detector, and preloads the crawl cache when configured to
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let domain_cache = Arc::new(DomainCache::new());
        let detector = FrameworkDetector::new(Arc::clone(&config), domain_cache);
        let fetcher = Fetcher::new(&config.crawl)?;

        let mut cache = CrawlCache::new(&config.output.cache_dir, config.cache.enabled);
        if config.cache.preload_from_output {
            cache.preload(Path::new(&config.output.output_dir));
        }

        Ok(Coordinator {
            config,
            detector,
            fetcher,
            cache,
            stats: RunStats::new(),
        })
    }

    /// Crawls breadth-first from the seed, bounded by depth and page count,
    /// staying on the seed's domain
    pub async fn crawl(mut self, seed: Url) -> Result<RunStats> {
        let allowed_domain =
            extract_domain(&seed).ok_or(UrlError::MissingHost)?;
        let output_root = PathBuf::from(&self.config.output.output_dir);

        let mut queue: VecDeque<(Url, u32)> = VecDeque::new();
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(seed.to_string());
        queue.push_back((seed, 0));

        while let Some((url, depth)) = queue.pop_front() {
            if self.stats.pages_processed >= u64::from(self.config.crawl.max_pages) {
                info!(
                    max_pages = self.config.crawl.max_pages,
                    "page cap reached, stopping"
                );
                break;
            }

            let Some(response) = self.obtain(&url).await else {
                continue;
            };

            let framework = self.process(&response, &output_root);

            if depth < self.config.crawl.max_depth {
                let rules = &self.config.framework(&framework).link_rules;
                for link in extract_links(&response.body, &response.url, rules) {
                    if extract_domain(&link).as_deref() != Some(allowed_domain.as_str()) {
                        continue;
                    }
                    if seen.insert(link.to_string()) {
                        queue.push_back((link, depth + 1));
                    }
                }
            }
        }

        Ok(self.stats)
    }

    /// Obtains a response for a URL: crawl cache first, then a live fetch
    ///
    /// A fetch failure is recorded and recovered; the rest of the crawl is
    /// unaffected.
    async fn obtain(&mut self, url: &Url) -> Option<PageResponse> {
        if let Some(response) = self.cache.response_for(url.as_str()) {
            info!(url = %url, "crawl cache hit");
            self.stats.record_cache_hit();
            return Some(response);
        }

        if self.config.crawl.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.crawl.delay_ms)).await;
        }

        match self.fetcher.fetch(url).await {
            Ok(response) => {
                self.cache.record_fetch(&response.url, &response.body);
                Some(response)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "fetch failed");
                self.stats.record_failure();
                None
            }
        }
    }

    /// Runs one page through classify → extract → assemble → persist
    ///
    /// Returns the detected framework name so link rules can be resolved.
    fn process(&mut self, response: &PageResponse, output_root: &Path) -> String {
        let doc = PageDocument::parse(response);
        let framework = self.detector.detect(&doc);
        let fw = self.config.framework(&framework);

        let extracted = extract_document(&doc, fw);
        let page = DocPage::new(response.url.clone(), extracted, framework.clone());

        if response.from_cache {
            // Output for this URL already exists; don't rewrite it
            debug!(url = %response.url, "cache-sourced page, skipping persist");
            self.stats.record_success(&framework);
            return framework;
        }

        match write_document(output_root, &page) {
            Ok(path) => {
                info!(url = %response.url, path = %path.display(), %framework, "saved");
                self.stats.record_success(&framework);
            }
            Err(e) => {
                warn!(url = %response.url, error = %e, "failed to write document");
                self.stats.record_failure();
            }
        }

        framework
    }
}

/// Convenience entry point: runs a full crawl from a seed URL
pub async fn crawl(config: Config, seed: Url) -> Result<RunStats> {
    Coordinator::new(Arc::new(config))?.crawl(seed).await
}
