use url::Url;

/// The only scheme Skimmer fetches
pub const SECURE_SCHEME: &str = "https";

/// Resolves a raw `href` value against the page it was found on
///
/// Resolution follows RFC 3986 reference resolution, so absolute links are
/// returned unchanged and relative ones are joined onto `base`. Links with a
/// non-web scheme (`mailto:`, `javascript:`) still resolve; they are rejected
/// later by the scheme check.
///
/// Returns None if:
/// - the href is empty or whitespace only (a self-reference)
/// - the href is fragment-only (a same-page anchor)
/// - the href cannot be parsed as a URL reference
///
/// # Examples
///
/// ```
/// use url::Url;
/// use skimmer::url::resolve_link;
///
/// let base = Url::parse("https://example.com/a").unwrap();
/// let resolved = resolve_link("/b", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/b");
///
/// assert!(resolve_link("#top", &base).is_none());
/// ```
pub fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(resolved) => Some(resolved),
        Err(e) => {
            tracing::debug!("Failed to resolve link {:?} against {}: {}", href, base, e);
            None
        }
    }
}
