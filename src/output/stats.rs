use std::collections::HashMap;

/// Counters for one crawl run
///
/// Individual page failures surface only as log lines; this summary is the
/// user-visible report printed at the end of a run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Total pages processed
    pub pages_processed: u64,

    /// Pages that produced a persisted document
    pub pages_succeeded: u64,

    /// Pages that failed to fetch or persist
    pub pages_failed: u64,

    /// Pages served from the crawl cache instead of the network
    pub cache_hits: u64,

    /// Count of processed pages per detected framework
    pub frameworks: HashMap<String, u64>,
}

impl RunStats {
    pub fn new() -> Self {
        RunStats::default()
    }

    /// Records a successfully processed page and its framework
    pub fn record_success(&mut self, framework: &str) {
        self.pages_processed += 1;
        self.pages_succeeded += 1;
        *self.frameworks.entry(framework.to_string()).or_insert(0) += 1;
    }

    /// Records a page that failed to process
    pub fn record_failure(&mut self) {
        self.pages_processed += 1;
        self.pages_failed += 1;
    }

    /// Records a crawl-cache hit
    pub fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    /// Prints the end-of-run summary to stdout
    pub fn print_summary(&self) {
        println!("=== Crawl Summary ===\n");

        println!("Pages processed: {}", self.pages_processed);
        println!("  Succeeded: {}", self.pages_succeeded);
        println!("  Failed: {}", self.pages_failed);
        println!("  Cache hits: {}", self.cache_hits);

        if !self.frameworks.is_empty() {
            println!("\nPages by Framework:");

            // Sort by count (descending), then name for stable output
            let mut counts: Vec<_> = self.frameworks.iter().collect();
            counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

            for (framework, count) in counts {
                let percentage = if self.pages_succeeded > 0 {
                    (*count as f64 / self.pages_succeeded as f64) * 100.0
                } else {
                    0.0
                };
                println!("  {}: {} ({:.1}%)", framework, count, percentage);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = RunStats::new();
        stats.record_success("sphinx");
        stats.record_success("sphinx");
        stats.record_success("mkdocs");
        stats.record_failure();
        stats.record_cache_hit();

        assert_eq!(stats.pages_processed, 4);
        assert_eq!(stats.pages_succeeded, 3);
        assert_eq!(stats.pages_failed, 1);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.frameworks.get("sphinx"), Some(&2));
        assert_eq!(stats.frameworks.get("mkdocs"), Some(&1));
    }

    #[test]
    fn test_default_is_zeroed() {
        let stats = RunStats::new();
        assert_eq!(stats.pages_processed, 0);
        assert!(stats.frameworks.is_empty());
    }
}
