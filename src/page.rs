//! Fetched page representation and selector queries
//!
//! [`PageResponse`] is the transport handed over by the fetch engine (or
//! synthesized by the crawl cache). [`PageDocument`] wraps a parsed response
//! and exposes the CSS-selector queries the classifier and extractor run
//! against it. A selector that fails to parse or match is treated as having
//! produced nothing; extraction of the remaining fields always continues.

use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

/// A fetched page as delivered by the fetch engine
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// Resolved absolute URL of the page
    pub url: Url,

    /// HTTP status code
    pub status: u16,

    /// Raw body text
    pub body: String,

    /// True when this response was synthesized from the crawl cache
    /// rather than fetched live
    pub from_cache: bool,
}

impl PageResponse {
    /// Creates a response for a live fetch
    pub fn new(url: Url, status: u16, body: String) -> Self {
        PageResponse {
            url,
            status,
            body,
            from_cache: false,
        }
    }

    /// Creates a response synthesized from the crawl cache
    ///
    /// Indistinguishable from a fresh fetch to the classifier and extractor;
    /// the `from_cache` flag lets the orchestrator skip re-persisting output.
    pub fn cached(url: Url, body: String) -> Self {
        PageResponse {
            url,
            status: 200,
            body,
            from_cache: true,
        }
    }
}

/// A parsed page with CSS-selector query support
pub struct PageDocument {
    url: Url,
    body: String,
    doc: Html,
}

impl PageDocument {
    /// Parses a response body into a queryable document
    pub fn parse(response: &PageResponse) -> Self {
        PageDocument {
            url: response.url.clone(),
            body: response.body.clone(),
            doc: Html::parse_document(&response.body),
        }
    }

    /// The page's resolved absolute URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The raw body text
    pub fn body(&self) -> &str {
        &self.body
    }

    /// First non-empty trimmed text for the given selector
    pub fn first_text(&self, selector: &str) -> Option<String> {
        let parsed = self.parse_selector(selector)?;
        self.doc
            .select(&parsed)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .find(|text| !text.is_empty())
    }

    /// Outer HTML of the first element matching the given selector
    pub fn first_html(&self, selector: &str) -> Option<String> {
        let parsed = self.parse_selector(selector)?;
        self.doc.select(&parsed).next().map(|el| el.html())
    }

    /// Attribute value of the first element matching the given selector
    pub fn first_attr(&self, selector: &str, attr: &str) -> Option<String> {
        let parsed = self.parse_selector(selector)?;
        self.doc
            .select(&parsed)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Attribute values of every element matching the given selector
    pub fn all_attrs(&self, selector: &str, attr: &str) -> Vec<String> {
        let Some(parsed) = self.parse_selector(selector) else {
            return Vec::new();
        };
        self.doc
            .select(&parsed)
            .filter_map(|el| el.value().attr(attr))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Content of a `<meta name="...">` tag
    pub fn meta_name(&self, name: &str) -> Option<String> {
        self.first_attr(&format!(r#"meta[name="{name}"]"#), "content")
    }

    /// Content of the first `<meta property="...">` tag
    pub fn meta_property(&self, property: &str) -> Option<String> {
        self.first_attr(&format!(r#"meta[property="{property}"]"#), "content")
    }

    /// Contents of every `<meta property="...">` tag
    pub fn meta_property_all(&self, property: &str) -> Vec<String> {
        self.all_attrs(&format!(r#"meta[property="{property}"]"#), "content")
    }

    fn parse_selector(&self, selector: &str) -> Option<Selector> {
        match Selector::parse(selector) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                warn!(selector, url = %self.url, "skipping unparseable selector");
                None
            }
        }
    }
}
