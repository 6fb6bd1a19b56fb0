use crate::pattern::{compile_pattern, parse_pattern, parse_patterns, UrlMatcher};
use crate::rules::types::{Configuration, MatchResult, Rule};
use crate::PatternError;

/// Selects the prompt and selector that apply to a URL
///
/// Groups are searched in stored order (the default group is skipped), then
/// rules in stored order, then the patterns of each rule in order. The first
/// pattern that accepts the URL wins; there is no specificity ranking.
///
/// When nothing matches, the default group's prompt and selector are
/// returned. A configuration without a default group falls back to
/// `default_prompt` with an empty selector.
///
/// Invalid patterns never match and never abort the search.
///
/// # Examples
///
/// ```
/// use page_prompt::rules::{match_url, Configuration, Group, Rule};
///
/// let config = Configuration::new(vec![
///     Group::new_custom("g1", "code", vec![Rule::new("r1", "github.com", "")]),
///     Group::new_default("g2", "general"),
/// ]);
///
/// assert_eq!(match_url("https://github.com/rust-lang", &config, "fallback").prompt, "code");
/// assert_eq!(match_url("https://example.com/", &config, "fallback").prompt, "general");
/// ```
pub fn match_url(url: &str, config: &Configuration, default_prompt: &str) -> MatchResult {
    for group in config.custom_groups() {
        for rule in &group.rules {
            if rule_matches(rule, url) {
                tracing::debug!(
                    "{} matched rule {} in group {}",
                    url,
                    rule.id,
                    group.id
                );
                return MatchResult::new(group.prompt.clone(), rule.css_selector.clone());
            }
        }
    }

    match config.default_group() {
        Some(group) => {
            tracing::debug!("{} fell through to default group {}", url, group.id);
            MatchResult::new(group.prompt.clone(), group.css_selector.clone())
        }
        None => {
            tracing::debug!("{} matched nothing and no default group exists", url);
            MatchResult::fallback(default_prompt)
        }
    }
}

/// Returns true if any pattern of the rule accepts the URL
fn rule_matches(rule: &Rule, url: &str) -> bool {
    parse_patterns(&rule.url_pattern)
        .into_iter()
        .any(|raw| match compile_pattern(raw) {
            Some(matcher) => matcher.test(url),
            None => {
                tracing::trace!("Skipping invalid pattern '{}' in rule {}", raw, rule.id);
                false
            }
        })
}

/// A pattern that was skipped while compiling a configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPattern {
    pub group_id: String,
    pub rule_id: String,
    pub pattern: String,
    pub reason: PatternError,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    matchers: Vec<UrlMatcher>,
    result: MatchResult,
}

/// A configuration with every pattern compiled up front
///
/// Produces the same results as [`match_url`] but compiles each pattern once,
/// which suits matching many URLs against one configuration.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    rules: Vec<CompiledRule>,
    fallback: MatchResult,
    invalid: Vec<InvalidPattern>,
}

impl CompiledRules {
    /// Compiles every pattern of `config`, recording the ones that are invalid
    pub fn new(config: &Configuration, default_prompt: &str) -> Self {
        let mut rules = Vec::new();
        let mut invalid = Vec::new();

        for group in config.custom_groups() {
            for rule in &group.rules {
                let mut matchers = Vec::new();
                for raw in parse_patterns(&rule.url_pattern) {
                    match parse_pattern(raw) {
                        Ok(matcher) => matchers.push(matcher),
                        Err(reason) => invalid.push(InvalidPattern {
                            group_id: group.id.clone(),
                            rule_id: rule.id.clone(),
                            pattern: raw.to_string(),
                            reason,
                        }),
                    }
                }

                if !matchers.is_empty() {
                    rules.push(CompiledRule {
                        matchers,
                        result: MatchResult::new(group.prompt.clone(), rule.css_selector.clone()),
                    });
                }
            }
        }

        let fallback = match config.default_group() {
            Some(group) => MatchResult::new(group.prompt.clone(), group.css_selector.clone()),
            None => MatchResult::fallback(default_prompt),
        };

        Self {
            rules,
            fallback,
            invalid,
        }
    }

    /// Finds the result for a URL (first match wins)
    pub fn find(&self, url: &str) -> &MatchResult {
        self.rules
            .iter()
            .find(|rule| rule.matchers.iter().any(|m| m.test(url)))
            .map_or(&self.fallback, |rule| &rule.result)
    }

    /// Patterns that failed to compile, in configuration order
    pub fn invalid_patterns(&self) -> &[InvalidPattern] {
        &self.invalid
    }
}
