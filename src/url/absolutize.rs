use dom_query::{Document, Selection};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Element/attribute pairs that carry URLs in page markup
const URL_ATTRIBUTES: &[(&str, &str)] = &[
    ("img", "src"),
    ("a", "href"),
    ("link", "href"),
    ("script", "src"),
    ("source", "src"),
    ("video", "src"),
    ("video", "poster"),
    ("audio", "src"),
    ("iframe", "src"),
    ("embed", "src"),
    ("object", "data"),
];

/// Image syntax: `![alt](url)`
static MD_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").expect("valid regex"));

/// Inline link syntax: `[text](url)`
static MD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("valid regex"));

/// Reference definition syntax: `[ref]: url`
static MD_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^( {0,3})\[([^\]]+)\]:[ \t]*(\S+)").expect("valid regex"));

/// Rewrites every URL-bearing attribute in an HTML fragment to absolute form
///
/// Each attribute value is resolved against `base` with standard relative-URL
/// resolution and overwritten in place. Values already carrying a scheme
/// resolve to themselves, so a second application of this pass is a no-op.
///
/// # Arguments
///
/// * `html` - The HTML fragment (or full document) to rewrite
/// * `base` - The page URL relative references are resolved against
pub fn absolutize_html(html: &str, base: &Url) -> String {
    let doc = Document::from(html);

    for (tag, attr) in URL_ATTRIBUTES {
        let selector = format!("{tag}[{attr}]");
        for node in doc.select(&selector).nodes() {
            let sel = Selection::from(*node);
            if let Some(value) = sel.attr(attr) {
                let resolved = resolve_reference(&value, base);
                if resolved != *value {
                    sel.set_attr(attr, &resolved);
                }
            }
        }
    }

    doc.html().to_string()
}

/// Rewrites relative URLs in converted Markdown text to absolute form
///
/// Three rewrites are applied in order: image syntax, inline link syntax,
/// then reference definitions. URLs that already start with `http://`,
/// `https://`, `data:`, `mailto:`, `tel:`, or `#` are left untouched;
/// labels are never altered.
///
/// # Arguments
///
/// * `markdown` - The converted Markdown text
/// * `base` - The page URL relative references are resolved against
pub fn absolutize_markdown(markdown: &str, base: &Url) -> String {
    let pass1 = MD_IMAGE.replace_all(markdown, |caps: &regex::Captures| {
        format!("![{}]({})", &caps[1], resolve_markdown_target(&caps[2], base))
    });

    let pass2 = MD_LINK.replace_all(&pass1, |caps: &regex::Captures| {
        format!("[{}]({})", &caps[1], resolve_markdown_target(&caps[2], base))
    });

    MD_REFERENCE
        .replace_all(&pass2, |caps: &regex::Captures| {
            format!(
                "{}[{}]: {}",
                &caps[1],
                &caps[2],
                resolve_markdown_url(&caps[3], base)
            )
        })
        .into_owned()
}

/// Resolves one attribute value against the base URL
///
/// Scheme-carrying special references (`data:`, `javascript:`, `mailto:`,
/// `tel:`) and values that fail to resolve are returned unchanged.
fn resolve_reference(value: &str, base: &Url) -> String {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return value.to_string();
    }

    if trimmed.starts_with("data:")
        || trimmed.starts_with("javascript:")
        || trimmed.starts_with("mailto:")
        || trimmed.starts_with("tel:")
    {
        return value.to_string();
    }

    match base.join(trimmed) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => value.to_string(),
    }
}

/// Resolves the target portion of a Markdown link, preserving any title
///
/// `[text](url "title")` keeps its title text; only the URL token is
/// rewritten.
fn resolve_markdown_target(target: &str, base: &Url) -> String {
    let trimmed = target.trim();

    match trimmed.split_once(char::is_whitespace) {
        Some((url, rest)) => format!("{} {}", resolve_markdown_url(url, base), rest.trim_start()),
        None => resolve_markdown_url(trimmed, base),
    }
}

/// Resolves one Markdown URL against the base URL
fn resolve_markdown_url(url: &str, base: &Url) -> String {
    const KEEP_PREFIXES: &[&str] = &["http://", "https://", "data:", "mailto:", "tel:", "#"];

    if url.is_empty() || KEEP_PREFIXES.iter().any(|p| url.starts_with(p)) {
        return url.to_string();
    }

    match base.join(url) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://docs.example.io/en/latest/guide.html").unwrap()
    }

    #[test]
    fn test_html_rewrites_relative_img() {
        let html = r#"<img src="/img/a.png">"#;
        let out = absolutize_html(html, &base());
        assert!(out.contains(r#"src="https://docs.example.io/img/a.png""#));
    }

    #[test]
    fn test_html_rewrites_path_relative_href() {
        let html = r#"<a href="../install.html">Install</a>"#;
        let out = absolutize_html(html, &base());
        assert!(out.contains(r#"href="https://docs.example.io/en/install.html""#));
    }

    #[test]
    fn test_html_keeps_absolute_urls() {
        let html = r#"<a href="https://other.example.com/page">x</a>"#;
        let out = absolutize_html(html, &base());
        assert!(out.contains(r#"href="https://other.example.com/page""#));
    }

    #[test]
    fn test_html_keeps_data_uri() {
        let html = r#"<img src="data:image/png;base64,AAAA">"#;
        let out = absolutize_html(html, &base());
        assert!(out.contains(r#"src="data:image/png;base64,AAAA""#));
    }

    #[test]
    fn test_html_rewrites_all_attribute_kinds() {
        let html = concat!(
            r#"<link href="/style.css">"#,
            r#"<script src="/app.js"></script>"#,
            r#"<video src="/v.mp4" poster="/p.jpg"></video>"#,
            r#"<iframe src="/frame.html"></iframe>"#,
            r#"<object data="/doc.pdf"></object>"#,
        );
        let out = absolutize_html(html, &base());
        assert!(out.contains(r#"href="https://docs.example.io/style.css""#));
        assert!(out.contains(r#"src="https://docs.example.io/app.js""#));
        assert!(out.contains(r#"src="https://docs.example.io/v.mp4""#));
        assert!(out.contains(r#"poster="https://docs.example.io/p.jpg""#));
        assert!(out.contains(r#"src="https://docs.example.io/frame.html""#));
        assert!(out.contains(r#"data="https://docs.example.io/doc.pdf""#));
    }

    #[test]
    fn test_html_pass_is_idempotent() {
        let html = r#"<div><a href="/a">x</a><img src="img/b.png"></div>"#;
        let once = absolutize_html(html, &base());
        let twice = absolutize_html(&once, &base());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_markdown_rewrites_image() {
        let md = "![logo](/img/logo.png)";
        assert_eq!(
            absolutize_markdown(md, &base()),
            "![logo](https://docs.example.io/img/logo.png)"
        );
    }

    #[test]
    fn test_markdown_rewrites_inline_link() {
        let md = "see [install](../install.html) first";
        assert_eq!(
            absolutize_markdown(md, &base()),
            "see [install](https://docs.example.io/en/install.html) first"
        );
    }

    #[test]
    fn test_markdown_rewrites_reference_definition() {
        let md = "[guide]: intro.html";
        assert_eq!(
            absolutize_markdown(md, &base()),
            "[guide]: https://docs.example.io/en/latest/intro.html"
        );
    }

    #[test]
    fn test_markdown_keeps_special_prefixes() {
        for md in [
            "[a](https://x.io/p)",
            "[b](http://x.io/p)",
            "[c](mailto:doc@x.io)",
            "[d](tel:+123)",
            "[e](#section)",
            "![f](data:image/png;base64,AA)",
        ] {
            assert_eq!(absolutize_markdown(md, &base()), md);
        }
    }

    #[test]
    fn test_markdown_multiple_matches_per_line() {
        let md = "[a](/one) and [b](/two)";
        assert_eq!(
            absolutize_markdown(md, &base()),
            "[a](https://docs.example.io/one) and [b](https://docs.example.io/two)"
        );
    }

    #[test]
    fn test_markdown_preserves_labels_and_titles() {
        let md = r#"[click (here) now](/page "My Title")"#;
        let out = absolutize_markdown(md, &base());
        assert!(out.contains("https://docs.example.io/page"));
        assert!(out.contains(r#""My Title""#));
    }

    #[test]
    fn test_markdown_pass_is_idempotent() {
        let md = "![a](/img.png) [b](page.html) more [c](https://x.io)\n\n[ref]: other.html";
        let once = absolutize_markdown(md, &base());
        let twice = absolutize_markdown(&once, &base());
        assert_eq!(once, twice);
    }
}
