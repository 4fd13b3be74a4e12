use htmd::options::{BulletListMarker, HeadingStyle, Options};
use htmd::HtmlToMarkdown;
use tracing::warn;

/// Converts an HTML fragment to Markdown
///
/// Elements whose tag name appears in `strip_tags` are removed together with
/// all of their descendants before serialization. The output uses ATX-style
/// headings and `*` as the bullet marker. A conversion failure yields an
/// empty string and a warning; it never aborts processing of the page.
///
/// # Arguments
///
/// * `html` - The HTML fragment to convert
/// * `strip_tags` - Tag names to drop before conversion
pub fn convert_to_markdown(html: &str, strip_tags: &[String]) -> String {
    let mut builder = HtmlToMarkdown::builder().options(Options {
        heading_style: HeadingStyle::Atx,
        bullet_list_marker: BulletListMarker::Asterisk,
        ..Options::default()
    });

    if !strip_tags.is_empty() {
        let skip: Vec<&str> = strip_tags.iter().map(String::as_str).collect();
        builder = builder.skip_tags(skip);
    }

    let converter = builder.build();

    match converter.convert(html) {
        Ok(markdown) => markdown,
        Err(e) => {
            warn!(error = %e, "HTML to Markdown conversion failed");
            String::new()
        }
    }
}
