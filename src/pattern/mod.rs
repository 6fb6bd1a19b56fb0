//! URL pattern handling for Page-Prompt
//!
//! This module turns loosely typed, user-entered URL patterns into canonical
//! match patterns and compiles them into reusable matchers.

mod compile;
mod normalize;

use url::Url;

// Re-export main functions
pub use compile::{compile_pattern, parse_pattern, HostPattern, MatchPattern, UrlMatcher};
pub use normalize::normalize_pattern;

/// Pattern that matches every URL
pub const UNIVERSAL_PATTERN: &str = "*";

/// Returns true if the (trimmed) pattern matches every URL
///
/// Both the empty string and `*` are universal.
pub fn is_universal_pattern(pattern: &str) -> bool {
    let pattern = pattern.trim();
    pattern.is_empty() || pattern == UNIVERSAL_PATTERN
}

/// Splits a rule's pattern text into individual patterns
///
/// Patterns are separated by newlines. Each line is trimmed and blank lines
/// are dropped, so a rule with empty pattern text yields no patterns at all.
///
/// # Examples
///
/// ```
/// use page_prompt::pattern::parse_patterns;
///
/// let patterns = parse_patterns("github.com\n\n  *.example.com  \n");
/// assert_eq!(patterns, vec!["github.com", "*.example.com"]);
/// assert!(parse_patterns("").is_empty());
/// ```
pub fn parse_patterns(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Checks whether a URL is a page the matcher is meant to see
///
/// Only absolute `http` and `https` URLs qualify.
///
/// # Examples
///
/// ```
/// use page_prompt::pattern::is_matchable_url;
///
/// assert!(is_matchable_url("https://example.com/page"));
/// assert!(!is_matchable_url("chrome://extensions"));
/// assert!(!is_matchable_url("not a url"));
/// ```
pub fn is_matchable_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some(),
        Err(_) => false,
    }
}
