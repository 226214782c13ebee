//! Pure URL ancestry functions.
//!
//! Ancestry is derived from the URL string alone, never stored on pages.
//! All functions accept malformed input (missing leading slash, trailing
//! slashes) and normalize instead of failing.

/// Normalize a page URL.
///
/// Strips trailing slashes and ensures a leading slash. Malformed input is
/// treated as a single root-relative segment rather than an error.
///
/// Examples:
/// - `"/"` -> `"/"`
/// - `"/a/b/"` -> `"/a/b"`
/// - `"a/b"` -> `"/a/b"`
/// - `""` -> `"/"`
#[must_use]
pub fn normalize(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_owned();
    }
    if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

/// Ancestor URL chain for a page, root to self inclusive.
///
/// Rebuilds cumulative prefixes from the URL's path segments: the first
/// element is always the root URL `/`, the last element is the page's own
/// normalized URL. The chain length equals the number of `/`-delimited
/// segments (root = 1).
///
/// Examples:
/// - `"/"` -> `["/"]`
/// - `"/a"` -> `["/", "/a"]`
/// - `"/a/b"` -> `["/", "/a", "/a/b"]`
#[must_use]
pub fn parent_urls(url: &str) -> Vec<String> {
    let url = normalize(url);
    let mut chain = vec!["/".to_owned()];
    if url == "/" {
        return chain;
    }

    let mut prefix = String::with_capacity(url.len());
    for segment in url.split('/').filter(|s| !s.is_empty()) {
        prefix.push('/');
        prefix.push_str(segment);
        chain.push(prefix.clone());
    }
    chain
}
