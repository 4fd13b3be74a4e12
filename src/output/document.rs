use crate::extract::ExtractedContent;
use crate::output::front_matter::{render_front_matter, DocMetadata};
use chrono::Local;
use std::path::{Path, PathBuf};
use url::Url;

/// A fully processed page, ready to persist
///
/// Immutable after construction; one is produced per successfully fetched
/// page and consumed by the persister.
#[derive(Debug, Clone)]
pub struct DocPage {
    pub url: Url,
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub framework: String,
    pub crawl_time: String,
    pub content: String,
}

impl DocPage {
    /// Builds a document from an extraction result, stamped with the
    /// current local time
    pub fn new(url: Url, extracted: ExtractedContent, framework: String) -> Self {
        DocPage {
            url,
            title: extracted.title,
            tags: extracted.tags.into_iter().collect(),
            framework,
            crawl_time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            content: extracted.content,
        }
    }

    /// Assembles the document into its output path and serialized text
    pub fn assemble(&self) -> (PathBuf, String) {
        let metadata = DocMetadata {
            url: self.url.to_string(),
            title: self.title.clone(),
            tags: self.tags.clone(),
            framework: Some(self.framework.clone()),
            crawl_time: Some(self.crawl_time.clone()),
        };
        (output_path(&self.url), render_front_matter(&metadata, &self.content))
    }
}

/// Derives the output path for a URL, relative to the output root
///
/// The scheme is dropped and the host becomes the top directory. An empty or
/// root path maps to `index.md`; a trailing slash appends `index`; a
/// `.html`/`.htm` extension is stripped. Distinct URL paths map to distinct
/// files.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use docfold::output::output_path;
///
/// let url = Url::parse("https://example.com/a/b.html").unwrap();
/// assert_eq!(output_path(&url).to_str().unwrap(), "example.com/a/b.md");
/// ```
pub fn output_path(url: &Url) -> PathBuf {
    let host = url.host_str().unwrap_or("unknown-host");
    let path = url.path();

    if path.is_empty() || path == "/" {
        return PathBuf::from(host).join("index.md");
    }

    let path = path
        .strip_suffix(".html")
        .or_else(|| path.strip_suffix(".htm"))
        .unwrap_or(path);

    let mut path = path.trim_start_matches('/').to_string();
    if path.ends_with('/') {
        path.push_str("index");
    }

    PathBuf::from(host).join(format!("{path}.md"))
}

/// Writes an assembled document under the output root
///
/// Creates intermediate directories as needed. Returns the absolute path of
/// the written file; a failure here affects only this page and the caller
/// logs and swallows it.
pub fn write_document(output_root: &Path, page: &DocPage) -> std::io::Result<PathBuf> {
    let (relative, text) = page.assemble();
    let path = output_root.join(relative);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, text)?;

    Ok(path)
}
