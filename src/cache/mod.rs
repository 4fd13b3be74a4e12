//! URL-keyed crawl cache
//!
//! The single point of truth for "have we already produced output for this
//! URL". Preloads previously persisted documents by parsing their front
//! matter, serves synthesized responses for previously-seen URLs so the
//! fetch engine can short-circuit, and records freshly fetched raw HTML to a
//! side cache directory. The in-memory map is built once at preload time and
//! treated as read-only for the rest of the run.

use crate::output::{parse_front_matter, DocMetadata};
use crate::page::PageResponse;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

/// One preloaded document
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Persisted Markdown body, front matter stripped
    pub body: String,

    /// Metadata recovered from the document's front matter
    pub metadata: DocMetadata,

    /// Path of the persisted document this entry came from
    pub path: PathBuf,
}

/// URL-keyed store of previously persisted documents
pub struct CrawlCache {
    enabled: bool,
    cache_dir: PathBuf,
    entries: HashMap<String, CacheEntry>,
}

impl CrawlCache {
    /// Creates a cache writing its raw-HTML side cache under `cache_dir`
    ///
    /// When `enabled` is false, lookups always report absent; preload and
    /// the side-cache write path still function.
    pub fn new(cache_dir: impl Into<PathBuf>, enabled: bool) -> Self {
        CrawlCache {
            enabled,
            cache_dir: cache_dir.into(),
            entries: HashMap::new(),
        }
    }

    /// Scans the persisted store and registers every document with a
    /// parseable front matter carrying a `url` key
    ///
    /// Malformed or missing front matter skips the file silently. Returns
    /// the number of entries registered.
    pub fn preload(&mut self, output_root: &Path) -> usize {
        let before = self.entries.len();

        let mut files = Vec::new();
        collect_markdown_files(output_root, &mut files);

        for path in files {
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            let Some((metadata, body)) = parse_front_matter(&content) else {
                continue;
            };

            debug!(url = %metadata.url, path = %path.display(), "preloaded document");
            self.entries.insert(
                metadata.url.clone(),
                CacheEntry {
                    body: body.to_string(),
                    metadata,
                    path,
                },
            );
        }

        let loaded = self.entries.len() - before;
        info!(loaded, "crawl cache preload complete");
        loaded
    }

    /// Exact-URL lookup; absent whenever the cache is disabled
    pub fn lookup(&self, url: &str) -> Option<&CacheEntry> {
        if !self.enabled {
            return None;
        }
        self.entries.get(url)
    }

    /// Synthesizes a response for a previously-seen URL
    ///
    /// The response serves the persisted Markdown body and is marked as
    /// cache-sourced so the orchestrator can skip re-persisting it.
    pub fn response_for(&self, url: &str) -> Option<PageResponse> {
        let entry = self.lookup(url)?;
        let parsed = Url::parse(url).ok()?;
        Some(PageResponse::cached(parsed, entry.body.clone()))
    }

    /// Persists a freshly fetched raw body to the side cache
    ///
    /// Keyed by a filesystem-safe transform of the URL's domain and path.
    /// Best-effort: failures are logged and never affect the page.
    pub fn record_fetch(&self, url: &Url, body: &str) {
        let Some(host) = url.host_str() else { return };
        let file_name = format!("{}{}.html", host, url.path().replace('/', "_"));
        let path = self.cache_dir.join(file_name);

        let result = std::fs::create_dir_all(&self.cache_dir)
            .and_then(|_| std::fs::write(&path, body));
        if let Err(e) = result {
            warn!(url = %url, error = %e, "failed to write side cache");
        }
    }

    /// Number of preloaded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Recursively collects `.md` files under a directory
///
/// Unreadable directories are skipped; preload is best-effort by design.
fn collect_markdown_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_markdown_files(&path, files);
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractedContent;
    use crate::output::{write_document, DocPage};
    use std::collections::BTreeSet;

    fn persist_page(root: &Path, url: &str, content: &str) {
        let page = DocPage::new(
            Url::parse(url).unwrap(),
            ExtractedContent {
                title: Some("Title".to_string()),
                tags: BTreeSet::new(),
                content: content.to_string(),
            },
            "sphinx".to_string(),
        );
        write_document(root, &page).unwrap();
    }

    #[test]
    fn test_preload_round_trip() {
        let output = tempfile::tempdir().unwrap();
        let cache_dir = tempfile::tempdir().unwrap();

        persist_page(output.path(), "https://x.io/a/b.html", "# A B\n");

        let mut cache = CrawlCache::new(cache_dir.path(), true);
        assert_eq!(cache.preload(output.path()), 1);

        let entry = cache.lookup("https://x.io/a/b.html").unwrap();
        assert_eq!(entry.metadata.url, "https://x.io/a/b.html");
        assert_eq!(entry.metadata.framework.as_deref(), Some("sphinx"));
        assert!(entry.body.contains("# A B"));
    }

    #[test]
    fn test_preload_walks_nested_directories() {
        let output = tempfile::tempdir().unwrap();
        persist_page(output.path(), "https://x.io/", "root\n");
        persist_page(output.path(), "https://x.io/deep/nested/page.html", "leaf\n");

        let mut cache = CrawlCache::new("unused-cache", true);
        assert_eq!(cache.preload(output.path()), 2);
        assert!(cache.lookup("https://x.io/").is_some());
        assert!(cache.lookup("https://x.io/deep/nested/page.html").is_some());
    }

    #[test]
    fn test_preload_skips_malformed_files() {
        let output = tempfile::tempdir().unwrap();
        std::fs::write(output.path().join("no-front-matter.md"), "# Plain\n").unwrap();
        std::fs::write(
            output.path().join("no-url.md"),
            "---\ntitle: X\n---\n\nbody\n",
        )
        .unwrap();

        let mut cache = CrawlCache::new("unused-cache", true);
        assert_eq!(cache.preload(output.path()), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_preload_missing_directory() {
        let mut cache = CrawlCache::new("unused-cache", true);
        assert_eq!(cache.preload(Path::new("/nonexistent/output")), 0);
    }

    #[test]
    fn test_lookup_absent_when_disabled() {
        let output = tempfile::tempdir().unwrap();
        persist_page(output.path(), "https://x.io/a.html", "body\n");

        let mut cache = CrawlCache::new("unused-cache", false);
        cache.preload(output.path());
        assert!(cache.lookup("https://x.io/a.html").is_none());
        assert!(cache.response_for("https://x.io/a.html").is_none());
    }

    #[test]
    fn test_lookup_is_exact() {
        let output = tempfile::tempdir().unwrap();
        persist_page(output.path(), "https://x.io/a.html", "body\n");

        let mut cache = CrawlCache::new("unused-cache", true);
        cache.preload(output.path());
        assert!(cache.lookup("https://x.io/a.html").is_some());
        assert!(cache.lookup("https://x.io/a.html/").is_none());
        assert!(cache.lookup("http://x.io/a.html").is_none());
    }

    #[test]
    fn test_response_synthesis() {
        let output = tempfile::tempdir().unwrap();
        persist_page(output.path(), "https://x.io/a.html", "# Body\n");

        let mut cache = CrawlCache::new("unused-cache", true);
        cache.preload(output.path());

        let response = cache.response_for("https://x.io/a.html").unwrap();
        assert!(response.from_cache);
        assert_eq!(response.status, 200);
        assert_eq!(response.url.as_str(), "https://x.io/a.html");
        // Front matter is stripped from the served body
        assert!(response.body.starts_with("# Body"));
        assert!(!response.body.contains("---"));
    }

    #[test]
    fn test_record_fetch_writes_side_cache() {
        let cache_dir = tempfile::tempdir().unwrap();
        let cache = CrawlCache::new(cache_dir.path(), true);

        let url = Url::parse("https://x.io/en/latest/guide.html").unwrap();
        cache.record_fetch(&url, "<html>raw</html>");

        let expected = cache_dir.path().join("x.io_en_latest_guide.html.html");
        let written = std::fs::read_to_string(expected).unwrap();
        assert_eq!(written, "<html>raw</html>");
    }

    #[test]
    fn test_record_fetch_failure_is_swallowed() {
        // Point the side cache at a path that cannot be a directory
        let file = tempfile::NamedTempFile::new().unwrap();
        let cache = CrawlCache::new(file.path(), true);
        let url = Url::parse("https://x.io/a").unwrap();
        cache.record_fetch(&url, "body");
    }
}
