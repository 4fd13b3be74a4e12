use serde::{Deserialize, Serialize};

/// Metadata block of a persisted document
///
/// `url` is the only key required when reading a document back; everything
/// else is optional. On the write side, `title` is omitted when absent and
/// `tags` when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocMetadata {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawl_time: Option<String>,
}

/// Serializes a document: front matter, a blank line, then the body
pub fn render_front_matter(metadata: &DocMetadata, body: &str) -> String {
    let yaml = serde_yaml::to_string(metadata).unwrap_or_default();
    format!("---\n{yaml}---\n\n{body}")
}

/// Parses a persisted document into its metadata and body
///
/// The front matter must open with a `---` line, carry a YAML body with a
/// `url` key, and close with a `---` line. Returns None for anything
/// malformed; preload treats that as a file to skip, not an error.
pub fn parse_front_matter(content: &str) -> Option<(DocMetadata, &str)> {
    let rest = content.strip_prefix("---\n")?;
    let end = rest.find("\n---\n")?;

    let yaml = &rest[..end + 1];
    let metadata: DocMetadata = serde_yaml::from_str(yaml).ok()?;
    if metadata.url.is_empty() {
        return None;
    }

    let body = &rest[end + "\n---\n".len()..];
    let body = body.strip_prefix('\n').unwrap_or(body);
    Some((metadata, body))
}
