//! URL handling for the crawl engine
//!
//! Provides URL normalization, host extraction, and the same-host check
//! that gates link expansion.

use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a raw URL string into a canonical `Url`
///
/// Normalization accepts only absolute http/https URLs, lowercases the
/// scheme and host (done by the `url` crate), and strips the fragment so
/// that `https://a.com/page#top` and `https://a.com/page` dedupe to the
/// same frontier entry.
///
/// # Arguments
///
/// * `raw` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - The normalized URL
/// * `Err(UrlError)` - The URL is relative, malformed, or non-http(s)
pub fn normalize_url(raw: &str) -> UrlResult<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}

/// Extracts the host of a URL, lowercased
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_ascii_lowercase())
}

/// Returns true when both URLs point at exactly the same host and port
///
/// The host match is exact and case-insensitive; subdomains are distinct
/// hosts (`blog.example.com` != `example.com`). Ports are compared after
/// filling in the scheme default, so `https://a.com` and `https://a.com:443`
/// agree while `https://a.com:8443` is a different origin.
pub fn is_same_host(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(ha), Some(hb)) => {
            ha.eq_ignore_ascii_case(hb) && a.port_or_known_default() == b.port_or_known_default()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_valid_url() {
        let url = normalize_url("https://example.com/page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_normalize_strips_fragment() {
        let url = normalize_url("https://example.com/page#section").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_normalize_lowercases_host() {
        let url = normalize_url("https://EXAMPLE.com/Page").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        // Path case is preserved
        assert_eq!(url.path(), "/Page");
    }

    #[test]
    fn test_normalize_rejects_relative() {
        assert!(normalize_url("/just/a/path").is_err());
    }

    #[test]
    fn test_normalize_rejects_non_http_scheme() {
        let result = normalize_url("ftp://example.com/file");
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let url = normalize_url("  https://example.com/  ").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_extract_host() {
        let url = Url::parse("https://Example.COM/page").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_same_host() {
        let a = Url::parse("https://example.com/a").unwrap();
        let b = Url::parse("https://example.com/b?x=1").unwrap();
        assert!(is_same_host(&a, &b));
    }

    #[test]
    fn test_different_host() {
        let a = Url::parse("https://example.com/").unwrap();
        let b = Url::parse("https://other.com/").unwrap();
        assert!(!is_same_host(&a, &b));
    }

    #[test]
    fn test_subdomain_is_not_same_host() {
        let a = Url::parse("https://example.com/").unwrap();
        let b = Url::parse("https://blog.example.com/").unwrap();
        assert!(!is_same_host(&a, &b));
    }

    #[test]
    fn test_different_port_is_not_same_host() {
        let a = Url::parse("http://127.0.0.1:8080/").unwrap();
        let b = Url::parse("http://127.0.0.1:9090/").unwrap();
        assert!(!is_same_host(&a, &b));
    }

    #[test]
    fn test_default_port_matches_explicit_port() {
        let a = Url::parse("https://example.com/").unwrap();
        let b = Url::parse("https://example.com:443/x").unwrap();
        assert!(is_same_host(&a, &b));
    }
}
