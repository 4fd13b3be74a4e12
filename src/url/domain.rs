use url::Url;

/// Extracts the domain from a URL
///
/// Retrieves the host portion of a URL and converts it to lowercase.
/// Returns None if the URL has no host (which shouldn't happen for valid
/// HTTP(S) URLs).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use docfold::url::extract_domain;
///
/// let url = Url::parse("https://Docs.Example.IO/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("docs.example.io".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Splits a URL into its normalized `(domain, path)` pair
///
/// Both components are lower-cased; the domain is scheme-stripped by
/// construction. This is the form the framework classifier matches URL
/// patterns against and keys its domain cache with.
pub fn domain_and_path(url: &Url) -> (String, String) {
    let domain = extract_domain(url).unwrap_or_default();
    let path = url.path().to_lowercase();
    (domain, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://docs.example.com/guide").unwrap();
        assert_eq!(extract_domain(&url), Some("docs.example.com".to_string()));
    }

    #[test]
    fn test_extract_lowercases() {
        let url = Url::parse("https://EXAMPLE.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_domain_and_path() {
        let url = Url::parse("https://docs.example.io/EN/Latest/Guide.html").unwrap();
        let (domain, path) = domain_and_path(&url);
        assert_eq!(domain, "docs.example.io");
        assert_eq!(path, "/en/latest/guide.html");
    }

    #[test]
    fn test_domain_and_path_root() {
        let url = Url::parse("https://docs.example.io").unwrap();
        let (domain, path) = domain_and_path(&url);
        assert_eq!(domain, "docs.example.io");
        assert_eq!(path, "/");
    }
}
