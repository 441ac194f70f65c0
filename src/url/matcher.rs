/// Checks if a host matches an allowed-domain pattern
///
/// Scope matching is explicit rather than guessed from registrable domains:
///
/// - `"example.com"` matches only the host `example.com`
/// - `"*.example.com"` matches `example.com` and every subdomain of it,
///   at any nesting level
///
/// Comparison ignores ASCII case and a trailing root dot on the host.
///
/// # Examples
///
/// ```
/// use webtrawl::url::matches_domain;
///
/// assert!(matches_domain("example.com", "EXAMPLE.com"));
/// assert!(!matches_domain("example.com", "blog.example.com"));
///
/// assert!(matches_domain("*.example.com", "example.com"));
/// assert!(matches_domain("*.example.com", "api.v2.example.com"));
/// assert!(!matches_domain("*.example.com", "notexample.com"));
/// ```
pub fn matches_domain(pattern: &str, host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let pattern = pattern.to_ascii_lowercase();

    if host.is_empty() {
        return false;
    }

    match pattern.strip_prefix("*.") {
        Some(base) => {
            host == base
                || (host.len() > base.len()
                    && host.ends_with(base)
                    && host.as_bytes()[host.len() - base.len() - 1] == b'.')
        }
        None => host == pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_pattern() {
        assert!(matches_domain("example.com", "example.com"));
        assert!(!matches_domain("example.com", "other.com"));
        assert!(!matches_domain("example.com", "www.example.com"));
        assert!(!matches_domain("blog.example.com", "example.com"));
    }

    #[test]
    fn test_case_and_trailing_dot_ignored() {
        assert!(matches_domain("Example.COM", "example.com"));
        assert!(matches_domain("example.com", "EXAMPLE.COM."));
        assert!(matches_domain("*.Example.com", "WWW.example.COM"));
    }

    #[test]
    fn test_wildcard_includes_bare_and_nested_hosts() {
        assert!(matches_domain("*.example.com", "example.com"));
        assert!(matches_domain("*.example.com", "www.example.com"));
        assert!(matches_domain("*.example.com", "deep.nested.sub.example.com"));
    }

    #[test]
    fn test_wildcard_requires_label_boundary() {
        assert!(!matches_domain("*.example.com", "myexample.com"));
        assert!(!matches_domain("*.example.com", "example.com.evil.org"));
        assert!(!matches_domain("*.example.com", "example.org"));
    }

    #[test]
    fn test_ip_hosts_match_exactly() {
        assert!(matches_domain("127.0.0.1", "127.0.0.1"));
        assert!(!matches_domain("127.0.0.1", "127.0.0.2"));
    }

    #[test]
    fn test_empty_host_never_matches() {
        assert!(!matches_domain("*.example.com", ""));
        assert!(!matches_domain("", ""));
    }
}
