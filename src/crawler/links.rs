use crate::config::{LinkFollowStrategy, LinkRules};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts the links to follow from a page body
///
/// Resolves every `a[href]` against the page URL, drops `javascript:`,
/// `mailto:`, `tel:`, and `data:` references, applies the framework's
/// allow/deny rules, and deduplicates while preserving document order.
/// Fragments are stripped from resolved links except under the
/// anchor-routes strategy, where `#/route` references are themselves pages.
///
/// # Arguments
///
/// * `body` - The page's HTML body
/// * `base` - The page URL relative links resolve against
/// * `rules` - The framework's link-following rules
pub fn extract_links(body: &str, base: &Url, rules: &LinkRules) -> Vec<Url> {
    let document = Html::parse_document(body);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let allow = compile_patterns(&rules.allow);
    let deny = compile_patterns(&rules.deny);

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(url) = resolve_link(href, base, rules.strategy) else {
            continue;
        };

        if !passes_rules(url.as_str(), &allow, &deny) {
            continue;
        }

        if seen.insert(url.to_string()) {
            links.push(url);
        }
    }

    links
}

/// Resolves one href to a followable URL
fn resolve_link(href: &str, base: &Url, strategy: LinkFollowStrategy) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if let Some(route) = href.strip_prefix('#') {
        // Fragment-only anchors are same-page jumps, except for single-page
        // frameworks routing through `#/path` fragments.
        if strategy == LinkFollowStrategy::AnchorRoutes && route.starts_with('/') {
            return base.join(href).ok();
        }
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }
    resolved.set_fragment(None);
    Some(resolved)
}

fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
    // Validation already proved these compile; skip any that do not
    patterns
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
}

/// Deny takes precedence; an empty allow list follows everything
fn passes_rules(url: &str, allow: &[Regex], deny: &[Regex]) -> bool {
    if deny.iter().any(|re| re.is_match(url)) {
        return false;
    }
    allow.is_empty() || allow.iter().any(|re| re.is_match(url))
}
