//! Path normalization.
//!
//! [`RouteTable::match_path`](crate::table::RouteTable::match_path) expects
//! normalized input and does not normalize on its own. History integrations
//! can run raw locations through [`normalize_path`] first.

use std::borrow::Cow;

/// Checks whether a path is already in normalized form.
///
/// - Starts with `/`
/// - No `//`, `\`, `?` or `#`
/// - No trailing `/` (except root)
///
/// ```
/// use waymark_std::path::is_normalized;
///
/// assert!(is_normalized("/"));
/// assert!(is_normalized("/editor/abc123"));
/// assert!(!is_normalized("/about/"));
/// assert!(!is_normalized("/view/xyz?tab=raw"));
/// ```
pub fn is_normalized(path: &str) -> bool {
    if !path.starts_with('/') {
        return false;
    }
    if path.contains("//") || path.contains(['\\', '?', '#']) {
        return false;
    }
    path == "/" || !path.ends_with('/')
}

/// Normalize a raw location path.
///
/// Returns `Cow::Borrowed` when the input is already normalized.
///
/// - Query string and fragment are dropped: `/view/xyz?tab=raw` → `/view/xyz`
/// - Trailing slashes: `/about/` → `/about`
/// - Repeated slashes: `/editor//42` → `/editor/42`
/// - Backslashes: `\about` → `/about`
/// - Empty input: `` → `/`
///
/// ```
/// use std::borrow::Cow;
/// use waymark_std::path::normalize_path;
///
/// assert!(matches!(normalize_path("/about"), Cow::Borrowed("/about")));
/// assert_eq!(normalize_path("/view/xyz/?tab=raw#top"), "/view/xyz");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_normalized(path) {
        return Cow::Borrowed(path);
    }

    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];

    let segments: Vec<&str> = path.split(['/', '\\']).filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Cow::Borrowed("/");
    }

    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in segments {
        normalized.push('/');
        normalized.push_str(segment);
    }
    Cow::Owned(normalized)
}
