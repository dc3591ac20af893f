use url::Url;

/// Canonical form of a page URL used when comparing category links
///
/// # Normalization Steps
///
/// 1. Lowercase the host (the `url` crate already does this on parse)
/// 2. Remove dot segments and repeated slashes from the path
/// 3. Remove the trailing slash (except for root `/`)
/// 4. Remove the fragment
/// 5. Drop an empty query string
///
/// Scheme and query parameters are left untouched: the site serves pages
/// such as `?page=2` that must not collapse into the first page.
///
/// # Examples
///
/// ```
/// use clue_harvest::links::canonical_url;
/// use url::Url;
///
/// let url = Url::parse("https://Crossword-Solver.io/answers/times/#top").unwrap();
/// assert_eq!(canonical_url(&url).as_str(), "https://crossword-solver.io/answers/times");
/// ```
pub fn canonical_url(url: &Url) -> Url {
    let mut canonical = url.clone();

    let path = normalize_path(canonical.path());
    canonical.set_path(&path);
    canonical.set_fragment(None);

    if canonical.query() == Some("") {
        canonical.set_query(None);
    }

    canonical
}

/// Normalizes a URL path by removing dot segments and trailing slashes
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}
