use crate::pattern::UNIVERSAL_PATTERN;

/// Separator between the scheme and the host of a match pattern
pub(crate) const SCHEME_SEPARATOR: &str = "://";

/// Normalizes a user-entered URL pattern into a canonical match pattern
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Empty input and `*` are returned as-is (they match everything)
/// 3. Without a scheme separator, prefix the wildcard scheme `*://`
/// 4. Without a path after the host, append `/*`
/// 5. With a path that has no `*`, append `*` so the path acts as a prefix
///
/// Normalizing an already-normalized pattern returns it unchanged.
///
/// # Examples
///
/// ```
/// use page_prompt::pattern::normalize_pattern;
///
/// assert_eq!(normalize_pattern("github.com"), "*://github.com/*");
/// assert_eq!(normalize_pattern("https://github.com"), "https://github.com/*");
/// assert_eq!(
///     normalize_pattern("wallstreetcn.com/livenews"),
///     "*://wallstreetcn.com/livenews*"
/// );
/// ```
pub fn normalize_pattern(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || raw == UNIVERSAL_PATTERN {
        return raw.to_string();
    }

    let mut normalized = if raw.contains(SCHEME_SEPARATOR) {
        raw.to_string()
    } else {
        format!("*{}{}", SCHEME_SEPARATOR, raw)
    };

    // The separator is always present here, the host starts right after it
    let host_start = normalized
        .find(SCHEME_SEPARATOR)
        .map_or(0, |i| i + SCHEME_SEPARATOR.len());

    match normalized[host_start..].find('/') {
        None => normalized.push_str("/*"),
        Some(offset) => {
            let path = &normalized[host_start + offset..];
            if !path.contains('*') {
                normalized.push('*');
            }
        }
    }

    normalized
}
