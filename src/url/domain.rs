use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webtrawl::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the origin of a URL as `scheme://host[:port]`
///
/// Politeness state (robots rules and request spacing) is keyed by origin.
/// The port is only included when it differs from the scheme default.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webtrawl::url::origin_of;
///
/// let url = Url::parse("https://example.com:443/a/b?c=d").unwrap();
/// assert_eq!(origin_of(&url), Some("https://example.com".to_string()));
/// ```
pub fn origin_of(url: &Url) -> Option<String> {
    let host = extract_domain(url)?;
    match url.port() {
        Some(port) => Some(format!("{}://{}:{}", url.scheme(), host, port)),
        None => Some(format!("{}://{}", url.scheme(), host)),
    }
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
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_no_host() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert_eq!(extract_domain(&url), None);
        assert_eq!(origin_of(&url), None);
    }

    #[test]
    fn test_origin_keeps_explicit_port() {
        let url = Url::parse("http://127.0.0.1:4321/page").unwrap();
        assert_eq!(origin_of(&url), Some("http://127.0.0.1:4321".to_string()));
    }

    #[test]
    fn test_origin_distinguishes_scheme() {
        let http = Url::parse("http://example.com/").unwrap();
        let https = Url::parse("https://example.com/").unwrap();
        assert_ne!(origin_of(&http), origin_of(&https));
    }
}
