//! Link handling for the harvester
//!
//! Resolves hrefs found on crawled pages into absolute URLs and compares
//! page URLs regardless of cosmetic differences (trailing slash, fragment).

mod normalize;

pub use normalize::canonical_url;

use url::Url;

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be ignored:
/// - empty hrefs
/// - javascript:, mailto:, tel: schemes and data: URIs
/// - fragment-only links (same page anchors)
/// - invalid URLs
/// - non-HTTP(S) URLs after resolution
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url),
        _ => None,
    }
}

/// Returns true if both URLs point at the same page
pub fn same_page(a: &Url, b: &Url) -> bool {
    canonical_url(a) == canonical_url(b)
}
