use url::Url;

/// Extracts the authority (host plus explicit port) from a URL
///
/// The host is lowercased. A port is appended only when it differs from the
/// scheme's default, so `https://example.com:443/` and `https://example.com/`
/// share the authority `example.com`. Userinfo is never part of the result.
///
/// This is deliberately looser than comparing the authority text as written:
/// a parsed [`Url`] no longer records an explicit default port, so a link
/// spelled `https://example.com:443/b` is treated as same-site with a start
/// page at `https://example.com/`.
///
/// # Arguments
///
/// * `url` - The URL to extract the authority from
///
/// # Returns
///
/// * `Some(String)` - The authority, e.g. `example.com` or `example.com:8443`
/// * `None` - If the URL has no host (`mailto:`, `data:`, ...)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use skimmer::url::authority;
///
/// let url = Url::parse("https://EXAMPLE.com/path").unwrap();
/// assert_eq!(authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://example.com:8443/path").unwrap();
/// assert_eq!(authority(&url), Some("example.com:8443".to_string()));
/// ```
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_host() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_subdomain_kept() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(authority(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_explicit_port_kept() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(authority(&url), Some("example.com:8080".to_string()));
    }

    #[test]
    fn test_default_port_dropped() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_userinfo_ignored() {
        let url = Url::parse("https://user:pw@example.com/").unwrap();
        assert_eq!(authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_mixed_case_lowered() {
        let url = Url::parse("https://Example.COM/page#section").unwrap();
        assert_eq!(authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_no_host() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert_eq!(authority(&url), None);
    }
}
