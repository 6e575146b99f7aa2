//! URL handling module for Skimmer
//!
//! This module provides authority extraction, relative link resolution and
//! the same-site secure-scheme filter applied to discovered links.

mod domain;
mod resolve;

// Re-export main functions
pub use domain::authority;
pub use resolve::{resolve_link, SECURE_SCHEME};

use ::url::Url;

/// Returns true if a resolved link may be fetched from a page on `domain`
///
/// A link is kept only when its scheme is exactly `https` and its authority
/// (host plus explicit port) equals `domain`. Path, query and fragment are
/// never considered.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use skimmer::url::is_same_site_https;
///
/// let link = Url::parse("https://example.com/b?page=2").unwrap();
/// assert!(is_same_site_https(&link, "example.com"));
///
/// let insecure = Url::parse("http://example.com/d").unwrap();
/// assert!(!is_same_site_https(&insecure, "example.com"));
/// ```
pub fn is_same_site_https(url: &Url, domain: &str) -> bool {
    url.scheme() == SECURE_SCHEME && authority(url).as_deref() == Some(domain)
}
