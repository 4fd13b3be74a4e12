use crate::config::CrawlConfig;
use crate::page::PageResponse;
use crate::{DocfoldError, Result};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Delay between retry attempts
const RETRY_DELAY: Duration = Duration::from_secs(3);

/// HTTP fetcher with User-Agent rotation and retry
///
/// Retries 5xx responses, 408/429, and timeouts up to the configured count;
/// everything else fails immediately. Non-HTML responses are rejected before
/// the body is read into a page.
pub struct Fetcher {
    client: Client,
    user_agents: Vec<String>,
    next_agent: AtomicUsize,
    retry_times: u32,
}

impl Fetcher {
    /// Builds a fetcher from the crawl configuration
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Fetcher {
            client,
            user_agents: config.user_agents.clone(),
            next_agent: AtomicUsize::new(0),
            retry_times: config.retry_times,
        })
    }

    /// Fetches a URL, retrying transient failures
    pub async fn fetch(&self, url: &Url) -> Result<PageResponse> {
        let mut attempt = 0;
        loop {
            match self.try_fetch(url).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.retry_times && is_retryable(&e) => {
                    attempt += 1;
                    warn!(url = %url, error = %e, attempt, "retrying fetch");
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_fetch(&self, url: &Url) -> Result<PageResponse> {
        let agent = self.next_user_agent();
        debug!(url = %url, agent, "fetching");

        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, agent)
            .send()
            .await
            .map_err(|source| DocfoldError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocfoldError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("text/html") {
            return Err(DocfoldError::NotHtml {
                url: url.to_string(),
                content_type,
            });
        }

        // The final URL after redirects is the page's resolved URL
        let final_url = response.url().clone();
        let body = response.text().await.map_err(|source| DocfoldError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(PageResponse::new(final_url, status.as_u16(), body))
    }

    /// Next User-Agent in round-robin order
    fn next_user_agent(&self) -> &str {
        let index = self.next_agent.fetch_add(1, Ordering::Relaxed);
        &self.user_agents[index % self.user_agents.len()]
    }
}

/// True for failures worth retrying: 5xx, 408, 429, and timeouts
fn is_retryable(error: &DocfoldError) -> bool {
    match error {
        DocfoldError::HttpStatus { status, .. } => {
            *status >= 500 || *status == 408 || *status == 429
        }
        DocfoldError::Http { source, .. } => source.is_timeout(),
        _ => false,
    }
}
