//! Rule configuration data model
//!
//! These types serialize to the canonical persisted shape:
//! `{"promptGroups": [{"id", "prompt", "isDefault", "cssSelector", "rules": [...]}]}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// A single URL rule inside a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Stable opaque identifier
    pub id: String,

    /// Newline-separated list of raw URL patterns
    #[serde(default)]
    pub url_pattern: String,

    /// Content selector; empty means "use the page URL"
    #[serde(default)]
    pub css_selector: String,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        url_pattern: impl Into<String>,
        css_selector: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            url_pattern: url_pattern.into(),
            css_selector: css_selector.into(),
        }
    }

    /// A rule with no patterns yet (never matches)
    pub fn empty(id: impl Into<String>) -> Self {
        Self::new(id, "", "")
    }
}

/// A prompt together with the rules that select it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Stable opaque identifier
    pub id: String,

    /// Prompt template used for every match in this group
    pub prompt: String,

    /// Whether this is the catch-all group
    #[serde(default)]
    pub is_default: bool,

    /// Content selector of the default group; unused on other groups
    #[serde(default)]
    pub css_selector: String,

    /// Ordered rules; always empty on the default group
    #[serde(default)]
    pub rules: Vec<Rule>,

    /// Fields written by newer versions, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Group {
    /// Creates a catch-all group with no rules
    pub fn new_default(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            is_default: true,
            css_selector: String::new(),
            rules: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Creates a regular group holding the given rules
    pub fn new_custom(id: impl Into<String>, prompt: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            is_default: false,
            css_selector: String::new(),
            rules,
            extra: Map::new(),
        }
    }

    /// Looks up a rule of this group by id
    pub fn find_rule(&self, rule_id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == rule_id)
    }
}

/// The full, ordered rule configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(rename = "promptGroups", default)]
    pub groups: Vec<Group>,
}

impl Configuration {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Returns the catch-all group, if any
    pub fn default_group(&self) -> Option<&Group> {
        self.groups.iter().find(|g| g.is_default)
    }

    /// Iterates over the non-default groups in stored order
    pub fn custom_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| !g.is_default)
    }

    /// Looks up a group by id
    pub fn find_group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn find_group_mut(&mut self, group_id: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == group_id)
    }

    /// Total number of rules across all groups
    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|g| g.rules.len()).sum()
    }

    /// Converts the configuration to its persisted JSON form
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// SHA-256 fingerprint of the persisted JSON form
    ///
    /// Two configurations that persist to the same JSON (ignoring key order)
    /// share a fingerprint.
    pub fn fingerprint(&self) -> String {
        self.to_value()
            .map(|value| fingerprint_value(&value))
            .unwrap_or_default()
    }
}

/// Computes the SHA-256 fingerprint of a persisted JSON value
///
/// Object keys are serialized in sorted order, so the digest does not depend
/// on the order keys were written in.
pub fn fingerprint_value(value: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// The outcome of matching a URL against a configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub prompt: String,

    /// Possibly empty content selector
    pub css_selector: String,
}

impl MatchResult {
    pub fn new(prompt: impl Into<String>, css_selector: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            css_selector: css_selector.into(),
        }
    }

    /// Result used when the configuration has no default group
    pub fn fallback(default_prompt: &str) -> Self {
        Self::new(default_prompt, "")
    }
}
