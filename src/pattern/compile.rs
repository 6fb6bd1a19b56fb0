use crate::pattern::normalize::{normalize_pattern, SCHEME_SEPARATOR};
use crate::pattern::is_universal_pattern;
use crate::PatternError;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Schemes a match pattern may name (`*` stands for http and https)
const SUPPORTED_SCHEMES: &[&str] = &["*", "http", "https", "ws", "wss", "ftp", "file"];

/// Host part of a match pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostPattern {
    /// `*`: any host
    Any,
    /// `*.example.com`: the host itself or any of its subdomains
    Subdomains(String),
    /// `example.com`: exactly this host
    Exact(String),
    /// No host at all (`file:///...`)
    Empty,
}

/// A validated `<scheme>://<host><path>` match pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPattern {
    /// Lowercase scheme, or `*`
    pub scheme: String,
    pub host: HostPattern,
    /// Path including the leading `/`; `*` is a wildcard
    pub path: String,
}

impl MatchPattern {
    /// Builds the anchored regex source equivalent to this pattern
    fn to_regex_source(&self) -> String {
        let scheme = if self.scheme == "*" {
            "https?".to_string()
        } else {
            regex::escape(&self.scheme)
        };

        let host = match &self.host {
            HostPattern::Any => "[^/?#]+".to_string(),
            // Labels stop at the first character that cannot be part of a host
            HostPattern::Subdomains(base) => {
                format!(r"(?:[^/?#@:]+\.)?{}{}", regex::escape(base), port_suffix(base))
            }
            HostPattern::Exact(host) => format!("{}{}", regex::escape(host), port_suffix(host)),
            HostPattern::Empty => String::new(),
        };

        let path = self
            .path
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        format!("^{}://{}(?:{})?$", scheme, host, path)
    }
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = match &self.host {
            HostPattern::Any => "*".to_string(),
            HostPattern::Subdomains(base) => format!("*.{}", base),
            HostPattern::Exact(host) => host.clone(),
            HostPattern::Empty => String::new(),
        };
        write!(f, "{}{}{}{}", self.scheme, SCHEME_SEPARATOR, host, self.path)
    }
}

/// A compiled URL predicate
///
/// Matchers are immutable; testing a URL has no side effects.
#[derive(Debug, Clone)]
pub enum UrlMatcher {
    /// Accepts every URL (the empty pattern or `*`)
    Any,
    /// Accepts URLs described by a match pattern
    Pattern { pattern: MatchPattern, regex: Regex },
}

impl UrlMatcher {
    /// Tests a full URL against this matcher (case-insensitive)
    pub fn test(&self, url: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Pattern { regex, .. } => regex.is_match(url),
        }
    }

    /// Returns the parsed pattern, or None for the universal matcher
    pub fn pattern(&self) -> Option<&MatchPattern> {
        match self {
            Self::Any => None,
            Self::Pattern { pattern, .. } => Some(pattern),
        }
    }
}

/// Parses and compiles a raw pattern, explaining why it is rejected
///
/// The raw pattern is normalized first. Use [`compile_pattern`] when the
/// reason for a rejection does not matter.
///
/// # Examples
///
/// ```
/// use page_prompt::pattern::parse_pattern;
/// use page_prompt::PatternError;
///
/// assert!(parse_pattern("*.youtube.com").is_ok());
/// assert!(matches!(parse_pattern("*foo*"), Err(PatternError::InvalidHost(_))));
/// ```
pub fn parse_pattern(raw: &str) -> Result<UrlMatcher, PatternError> {
    let normalized = normalize_pattern(raw);
    if is_universal_pattern(&normalized) {
        return Ok(UrlMatcher::Any);
    }

    let pattern = parse_match_pattern(&normalized)?;
    let regex = RegexBuilder::new(&pattern.to_regex_source())
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .map_err(|e| PatternError::Compile(e.to_string()))?;

    Ok(UrlMatcher::Pattern { pattern, regex })
}

/// Compiles a raw pattern into a matcher
///
/// Returns `None` for patterns that violate the match-pattern grammar; such
/// patterns simply never match anything.
///
/// # Examples
///
/// ```
/// use page_prompt::pattern::compile_pattern;
///
/// let matcher = compile_pattern("*.youtube.com").unwrap();
/// assert!(matcher.test("https://youtube.com/watch?v=1"));
/// assert!(matcher.test("http://m.youtube.com/x"));
/// assert!(!matcher.test("https://example.com"));
///
/// assert!(compile_pattern("*foo*").is_none());
/// ```
pub fn compile_pattern(raw: &str) -> Option<UrlMatcher> {
    parse_pattern(raw).ok()
}

/// Splits a normalized pattern into scheme, host and path and validates each
fn parse_match_pattern(normalized: &str) -> Result<MatchPattern, PatternError> {
    let (scheme, rest) = normalized
        .split_once(SCHEME_SEPARATOR)
        .ok_or_else(|| PatternError::MissingScheme(normalized.to_string()))?;

    let scheme = scheme.to_ascii_lowercase();
    if !SUPPORTED_SCHEMES.contains(&scheme.as_str()) {
        return Err(PatternError::UnsupportedScheme(scheme));
    }

    let path_start = rest
        .find('/')
        .ok_or_else(|| PatternError::MissingPath(normalized.to_string()))?;
    let (host, path) = rest.split_at(path_start);

    let host = if scheme == "file" {
        if !host.is_empty() {
            return Err(PatternError::InvalidHost(host.to_string()));
        }
        HostPattern::Empty
    } else {
        parse_host(host)?
    };

    Ok(MatchPattern {
        scheme,
        host,
        path: path.to_string(),
    })
}

fn parse_host(host: &str) -> Result<HostPattern, PatternError> {
    if host == "*" {
        return Ok(HostPattern::Any);
    }

    let (wildcard, base) = match host.strip_prefix("*.") {
        Some(base) => (true, base),
        None => (false, host),
    };

    if base.is_empty() || base.contains('*') {
        return Err(PatternError::InvalidHost(host.to_string()));
    }

    let base = base.to_lowercase();
    if wildcard {
        Ok(HostPattern::Subdomains(base))
    } else {
        Ok(HostPattern::Exact(base))
    }
}

/// A host without an explicit port matches on any port
fn port_suffix(host: &str) -> &'static str {
    if host.contains(':') && !host.ends_with(']') {
        ""
    } else {
        r"(?::\d+)?"
    }
}
