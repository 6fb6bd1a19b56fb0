//! Configuration migration
//!
//! Persisted rule configurations exist in three historical shapes:
//!
//! - **Flat rules**: a bare array of `{id, urlPattern, cssSelector, prompt}`
//!   records. The record whose pattern is `*` is the catch-all.
//! - **Rule groups**: `{"ruleGroups": [...]}` holding group-shaped records.
//! - **Prompt groups** (canonical): `{"promptGroups": [...]}`.
//!
//! [`Migrator`] turns any of them (or anything else) into a valid
//! [`Configuration`]. Migration never fails: data that cannot be interpreted
//! is dropped and the result always has exactly one default group.

use crate::pattern::UNIVERSAL_PATTERN;
use crate::rules::ids::{IdGenerator, RandomIds};
use crate::rules::types::{Configuration, Group, Rule};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Container key of the canonical shape
pub const PROMPT_GROUPS_KEY: &str = "promptGroups";

/// Container key of the intermediate grouped shape
pub const RULE_GROUPS_KEY: &str = "ruleGroups";

/// Group fields the migrator understands; everything else is carried over
const GROUP_FIELDS: &[&str] = &["id", "prompt", "isDefault", "cssSelector", "rules"];

/// Draws from the id generator before falling back to suffixed ids
const MAX_ID_ATTEMPTS: usize = 16;

/// The shape a persisted value was recognized as
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PersistedShape<'a> {
    /// Bare array of flat rule records
    FlatRules(&'a [Value]),
    /// `{"ruleGroups": [...]}`
    RuleGroups(&'a [Value]),
    /// `{"promptGroups": [...]}`
    PromptGroups(&'a [Value]),
    /// Anything else (null, scalars, objects without a group array)
    Unrecognized,
}

impl<'a> PersistedShape<'a> {
    /// Inspects a persisted value and classifies its shape
    ///
    /// An object carrying both containers is read as the canonical shape,
    /// since `promptGroups` is only ever written by the current version.
    pub fn detect(value: &'a Value) -> Self {
        match value {
            Value::Array(records) => Self::FlatRules(records),
            Value::Object(obj) => {
                if let Some(Value::Array(groups)) = obj.get(PROMPT_GROUPS_KEY) {
                    Self::PromptGroups(groups)
                } else if let Some(Value::Array(groups)) = obj.get(RULE_GROUPS_KEY) {
                    Self::RuleGroups(groups)
                } else {
                    Self::Unrecognized
                }
            }
            _ => Self::Unrecognized,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FlatRules(_) => "flat-rules",
            Self::RuleGroups(_) => "rule-groups",
            Self::PromptGroups(_) => "prompt-groups",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Upgrades and repairs rule configurations
///
/// The default prompt and the id source are supplied by the caller, so the
/// output depends only on the input and the ids handed out.
#[derive(Debug, Clone)]
pub struct Migrator<G = RandomIds> {
    default_prompt: String,
    ids: G,
}

impl Migrator<RandomIds> {
    /// Creates a migrator that generates random ids
    pub fn with_default_prompt(default_prompt: impl Into<String>) -> Self {
        Self::new(default_prompt, RandomIds)
    }
}

impl<G: IdGenerator> Migrator<G> {
    pub fn new(default_prompt: impl Into<String>, ids: G) -> Self {
        Self {
            default_prompt: default_prompt.into(),
            ids,
        }
    }

    pub fn default_prompt(&self) -> &str {
        &self.default_prompt
    }

    /// Configuration used on first run: one default group, no rules
    pub fn first_run(&mut self) -> Configuration {
        Configuration::new(vec![self.synthesize_default_group()])
    }

    /// Loads a persisted blob; a missing or null blob means first run
    pub fn load(&mut self, blob: Option<&Value>) -> Configuration {
        match blob {
            None | Some(Value::Null) => self.first_run(),
            Some(value) => self.normalize(value),
        }
    }

    /// Normalizes a candidate value of any shape into a valid configuration
    ///
    /// Running this on its own output returns an identical configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_prompt::rules::{Migrator, SequentialIds};
    /// use serde_json::json;
    ///
    /// let mut migrator = Migrator::new("default prompt", SequentialIds::new("id-"));
    /// let config = migrator.normalize(&json!([
    ///     {"urlPattern": "github.com", "prompt": "A"},
    ///     {"urlPattern": "*", "prompt": "B", "cssSelector": "#x"}
    /// ]));
    ///
    /// assert_eq!(config.groups.len(), 2);
    /// assert_eq!(config.default_group().map(|g| g.prompt.as_str()), Some("B"));
    /// ```
    pub fn normalize(&mut self, candidate: &Value) -> Configuration {
        let shape = PersistedShape::detect(candidate);
        tracing::debug!("Normalizing {} configuration", shape.name());

        match shape {
            PersistedShape::FlatRules(records) => self.migrate_flat_rules(records),
            PersistedShape::RuleGroups(groups) | PersistedShape::PromptGroups(groups) => {
                self.migrate_groups(groups)
            }
            PersistedShape::Unrecognized => {
                if !candidate.is_null() {
                    tracing::warn!("Discarding unrecognized configuration; starting from defaults");
                }
                self.first_run()
            }
        }
    }

    /// Re-validates an in-memory configuration before it is saved
    pub fn normalize_config(&mut self, config: Configuration) -> Configuration {
        self.enforce_invariants(config.groups)
    }

    /// Groups flat records by prompt text
    ///
    /// Each distinct prompt becomes a group holding the records with that
    /// prompt, in first-seen order. The first `*` record becomes the default
    /// group (it keeps its prompt and selector); without one, a default
    /// group with the default prompt is appended.
    fn migrate_flat_rules(&mut self, records: &[Value]) -> Configuration {
        let mut groups: Vec<Group> = Vec::new();
        let mut default_group: Option<Group> = None;

        for record in records.iter().filter_map(Value::as_object) {
            let prompt = string_field(record, "prompt")
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| self.default_prompt.clone());
            let url_pattern = string_field(record, "urlPattern").unwrap_or_default();
            let css_selector = string_field(record, "cssSelector").unwrap_or_default();
            let id = id_field(record);

            if url_pattern.trim() == UNIVERSAL_PATTERN {
                if default_group.is_some() {
                    tracing::warn!("Dropping extra catch-all rule with prompt '{}'", prompt);
                    continue;
                }
                let mut group =
                    Group::new_default(id.unwrap_or_else(|| self.ids.next_id()), prompt);
                group.css_selector = css_selector;
                default_group = Some(group);
                continue;
            }

            let rule = Rule::new(
                id.unwrap_or_else(|| self.ids.next_id()),
                url_pattern,
                css_selector,
            );
            match groups.iter().position(|g| g.prompt == prompt) {
                Some(index) => groups[index].rules.push(rule),
                None => {
                    let group_id = self.ids.next_id();
                    groups.push(Group::new_custom(group_id, prompt, vec![rule]));
                }
            }
        }

        tracing::info!(
            "Migrated {} flat rules into {} groups",
            records.len(),
            groups.len() + 1
        );

        groups.push(match default_group {
            Some(group) => group,
            None => self.synthesize_default_group(),
        });
        self.enforce_invariants(groups)
    }

    /// Reads group-shaped records, filling in missing fields
    fn migrate_groups(&mut self, records: &[Value]) -> Configuration {
        let groups = records
            .iter()
            .filter_map(Value::as_object)
            .map(|obj| self.decode_group(obj))
            .collect();
        self.enforce_invariants(groups)
    }

    fn decode_group(&mut self, obj: &Map<String, Value>) -> Group {
        let mut extra = obj.clone();
        for field in GROUP_FIELDS {
            extra.remove(*field);
        }

        let rules = match obj.get("rules").and_then(Value::as_array) {
            Some(rules) => rules
                .iter()
                .filter_map(Value::as_object)
                .map(|r| self.decode_rule(r))
                .collect(),
            None => Vec::new(),
        };

        Group {
            id: id_field(obj).unwrap_or_else(|| self.ids.next_id()),
            prompt: string_field(obj, "prompt").unwrap_or_else(|| self.default_prompt.clone()),
            is_default: obj.get("isDefault").and_then(Value::as_bool) == Some(true),
            css_selector: string_field(obj, "cssSelector").unwrap_or_default(),
            rules,
            extra,
        }
    }

    fn decode_rule(&mut self, obj: &Map<String, Value>) -> Rule {
        Rule::new(
            id_field(obj).unwrap_or_else(|| self.ids.next_id()),
            string_field(obj, "urlPattern").unwrap_or_default(),
            string_field(obj, "cssSelector").unwrap_or_default(),
        )
    }

    /// Enforces unique ids and exactly one default group without rules
    fn enforce_invariants(&mut self, mut groups: Vec<Group>) -> Configuration {
        let mut seen = HashSet::new();
        let mut has_default = false;

        for group in &mut groups {
            if group.id.is_empty() || !seen.insert(group.id.clone()) {
                let fresh = self.fresh_id(&mut seen);
                tracing::warn!("Group id '{}' missing or duplicated; reassigned {}", group.id, fresh);
                group.id = fresh;
            }

            if group.is_default {
                if has_default {
                    tracing::warn!("Demoting extra default group {}", group.id);
                    group.is_default = false;
                } else {
                    has_default = true;
                    if !group.rules.is_empty() {
                        tracing::warn!(
                            "Dropping {} rules attached to default group {}",
                            group.rules.len(),
                            group.id
                        );
                        group.rules.clear();
                    }
                }
            }

            for rule in &mut group.rules {
                if rule.id.is_empty() || !seen.insert(rule.id.clone()) {
                    let fresh = self.fresh_id(&mut seen);
                    tracing::warn!("Rule id '{}' missing or duplicated; reassigned {}", rule.id, fresh);
                    rule.id = fresh;
                }
            }
        }

        if !has_default {
            tracing::debug!("No default group present; appending one");
            let id = self.fresh_id(&mut seen);
            groups.push(Group::new_default(id, self.default_prompt.clone()));
        }

        Configuration::new(groups)
    }

    fn synthesize_default_group(&mut self) -> Group {
        Group::new_default(self.ids.next_id(), self.default_prompt.clone())
    }

    /// Draws ids until one is not in use, then records it
    ///
    /// After [`MAX_ID_ATTEMPTS`] collisions the last drawn id gets a numeric
    /// suffix instead, so a generator that repeats itself cannot stall.
    fn fresh_id(&mut self, seen: &mut HashSet<String>) -> String {
        let mut base = String::new();
        for _ in 0..MAX_ID_ATTEMPTS {
            base = self.ids.next_id();
            if !base.is_empty() && seen.insert(base.clone()) {
                return base;
            }
        }

        if base.is_empty() {
            base.push_str("id");
        }
        let mut n = 1usize;
        loop {
            let id = format!("{}-{}", base, n);
            if seen.insert(id.clone()) {
                tracing::debug!("Id generator kept colliding; using {}", id);
                return id;
            }
            n += 1;
        }
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Reads an id, accepting numbers written by older versions
fn id_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ids::SequentialIds;
    use serde_json::json;

    const DEFAULT: &str = "built-in prompt";

    fn migrator() -> Migrator<SequentialIds> {
        Migrator::new(DEFAULT, SequentialIds::new("id-"))
    }

    fn default_count(config: &Configuration) -> usize {
        config.groups.iter().filter(|g| g.is_default).count()
    }

    #[test]
    fn test_detect_shapes() {
        assert!(matches!(PersistedShape::detect(&json!([])), PersistedShape::FlatRules(_)));
        assert!(matches!(
            PersistedShape::detect(&json!({"ruleGroups": []})),
            PersistedShape::RuleGroups(_)
        ));
        assert!(matches!(
            PersistedShape::detect(&json!({"promptGroups": []})),
            PersistedShape::PromptGroups(_)
        ));
        assert_eq!(PersistedShape::detect(&json!(null)), PersistedShape::Unrecognized);
        assert_eq!(PersistedShape::detect(&json!({})), PersistedShape::Unrecognized);
        assert_eq!(
            PersistedShape::detect(&json!({"promptGroups": "oops"})),
            PersistedShape::Unrecognized
        );
    }

    #[test]
    fn test_detect_prefers_canonical_container() {
        let value = json!({"promptGroups": [], "ruleGroups": []});
        assert!(matches!(PersistedShape::detect(&value), PersistedShape::PromptGroups(_)));
    }

    #[test]
    fn test_flat_rules_grouped_by_prompt() {
        let config = migrator().normalize(&json!([
            {"urlPattern": "github.com", "prompt": "A"},
            {"urlPattern": "*", "prompt": "B", "cssSelector": "#x"}
        ]));

        assert_eq!(config.groups.len(), 2);

        let default = config.default_group().unwrap();
        assert_eq!(default.prompt, "B");
        assert_eq!(default.css_selector, "#x");
        assert!(default.rules.is_empty());

        let custom: Vec<_> = config.custom_groups().collect();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].prompt, "A");
        assert_eq!(custom[0].rules.len(), 1);
        assert_eq!(custom[0].rules[0].url_pattern, "github.com");
    }

    #[test]
    fn test_flat_rules_share_group_per_prompt() {
        let config = migrator().normalize(&json!([
            {"id": "a", "urlPattern": "a.com", "prompt": "P", "cssSelector": ".a"},
            {"id": "b", "urlPattern": "b.com", "prompt": "Q"},
            {"id": "c", "urlPattern": "c.com", "prompt": "P"}
        ]));

        assert_eq!(config.groups.len(), 3);
        assert_eq!(config.groups[0].prompt, "P");
        assert_eq!(
            config.groups[0].rules,
            vec![Rule::new("a", "a.com", ".a"), Rule::new("c", "c.com", "")]
        );
        assert_eq!(config.groups[1].prompt, "Q");
        assert_eq!(config.groups[1].rules, vec![Rule::new("b", "b.com", "")]);
    }

    #[test]
    fn test_flat_rules_without_catch_all_get_default_last() {
        let config = migrator().normalize(&json!([
            {"id": "r1", "urlPattern": "github.com", "prompt": "A"}
        ]));

        assert_eq!(config.groups.len(), 2);
        let last = config.groups.last().unwrap();
        assert!(last.is_default);
        assert_eq!(last.prompt, DEFAULT);
        assert_eq!(last.css_selector, "");
    }

    #[test]
    fn test_flat_catch_all_keeps_its_id() {
        let config = migrator().normalize(&json!([
            {"id": "star", "urlPattern": "*", "prompt": "B"}
        ]));

        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.groups[0].id, "star");
        assert!(config.groups[0].is_default);
    }

    #[test]
    fn test_flat_specific_rules_sharing_default_prompt_are_kept() {
        let config = migrator().normalize(&json!([
            {"urlPattern": "*", "prompt": "P"},
            {"urlPattern": "a.com", "prompt": "P"}
        ]));

        assert_eq!(config.groups.len(), 2);
        assert_eq!(default_count(&config), 1);
        let custom: Vec<_> = config.custom_groups().collect();
        assert_eq!(custom[0].prompt, "P");
        assert_eq!(custom[0].rules[0].url_pattern, "a.com");
        assert!(config.default_group().unwrap().rules.is_empty());
    }

    #[test]
    fn test_flat_extra_catch_all_dropped() {
        let config = migrator().normalize(&json!([
            {"urlPattern": "*", "prompt": "first"},
            {"urlPattern": "*", "prompt": "second"}
        ]));

        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.groups[0].prompt, "first");
    }

    #[test]
    fn test_flat_missing_prompt_uses_default() {
        let config = migrator().normalize(&json!([
            {"urlPattern": "a.com"},
            {"urlPattern": "b.com", "prompt": ""}
        ]));

        assert_eq!(config.groups[0].prompt, DEFAULT);
        assert_eq!(config.groups[0].rules.len(), 2);
    }

    #[test]
    fn test_flat_empty_array() {
        let config = migrator().normalize(&json!([]));
        assert_eq!(config.groups.len(), 1);
        assert!(config.groups[0].is_default);
        assert_eq!(config.groups[0].prompt, DEFAULT);
    }

    #[test]
    fn test_flat_skips_non_object_records() {
        let config = migrator().normalize(&json!([
            "junk",
            42,
            {"urlPattern": "a.com", "prompt": "A"}
        ]));
        assert_eq!(config.groups.len(), 2);
        assert_eq!(config.rule_count(), 1);
    }

    #[test]
    fn test_rule_groups_filled_and_upgraded() {
        let config = migrator().normalize(&json!({
            "ruleGroups": [
                {"id": "g1", "prompt": "A", "rules": [{"urlPattern": "github.com"}]}
            ]
        }));

        assert_eq!(config.groups.len(), 2);
        let group = &config.groups[0];
        assert_eq!(group.id, "g1");
        assert!(!group.is_default);
        assert_eq!(group.css_selector, "");
        assert_eq!(group.rules[0].id, "id-1");
        assert_eq!(group.rules[0].css_selector, "");
        assert!(config.groups[1].is_default);

        let value = config.to_value().unwrap();
        assert!(value.get(PROMPT_GROUPS_KEY).is_some());
        assert!(value.get(RULE_GROUPS_KEY).is_none());
    }

    #[test]
    fn test_rule_groups_with_default_not_duplicated() {
        let config = migrator().normalize(&json!({
            "ruleGroups": [
                {"id": "g1", "prompt": "A", "rules": []},
                {"id": "g2", "prompt": "B", "isDefault": true}
            ]
        }));

        assert_eq!(config.groups.len(), 2);
        assert_eq!(config.default_group().unwrap().id, "g2");
    }

    #[test]
    fn test_missing_default_is_added() {
        let config = migrator().normalize(&json!({
            "promptGroups": [
                {"id": "g1", "prompt": "A", "isDefault": false, "rules": []}
            ]
        }));

        assert_eq!(default_count(&config), 1);
        assert_eq!(config.groups.last().unwrap().prompt, DEFAULT);
    }

    #[test]
    fn test_is_default_requires_boolean_true() {
        let config = migrator().normalize(&json!({
            "promptGroups": [
                {"id": "g1", "prompt": "A", "isDefault": "true"}
            ]
        }));

        assert!(!config.groups[0].is_default);
        assert_eq!(default_count(&config), 1);
    }

    #[test]
    fn test_extra_defaults_demoted() {
        let config = migrator().normalize(&json!({
            "promptGroups": [
                {"id": "g1", "prompt": "A", "isDefault": true},
                {"id": "g2", "prompt": "B", "isDefault": true}
            ]
        }));

        assert_eq!(default_count(&config), 1);
        assert_eq!(config.default_group().unwrap().id, "g1");
        assert_eq!(config.groups.len(), 2);
    }

    #[test]
    fn test_default_group_rules_dropped() {
        let config = migrator().normalize(&json!({
            "promptGroups": [
                {"id": "g1", "prompt": "A", "isDefault": true, "rules": [{"id": "r1", "urlPattern": "a.com"}]}
            ]
        }));

        assert!(config.groups[0].rules.is_empty());
    }

    #[test]
    fn test_duplicate_ids_reassigned() {
        let config = migrator().normalize(&json!({
            "promptGroups": [
                {"id": "same", "prompt": "A", "rules": [{"id": "same", "urlPattern": "a.com"}]},
                {"id": "same", "prompt": "B", "isDefault": true}
            ]
        }));

        let mut ids: Vec<&str> = config.groups.iter().map(|g| g.id.as_str()).collect();
        ids.extend(config.groups.iter().flat_map(|g| g.rules.iter().map(|r| r.id.as_str())));
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(config.groups[0].id, "same");
    }

    #[test]
    fn test_numeric_ids_accepted() {
        let config = migrator().normalize(&json!({
            "promptGroups": [
                {"id": 7, "prompt": "A", "isDefault": true}
            ]
        }));
        assert_eq!(config.groups[0].id, "7");
    }

    #[test]
    fn test_unknown_group_fields_preserved() {
        let config = migrator().normalize(&json!({
            "promptGroups": [
                {"id": "g1", "prompt": "A", "isDefault": true, "color": "blue"}
            ]
        }));
        assert_eq!(config.groups[0].extra.get("color"), Some(&json!("blue")));
        assert!(config.groups[0].extra.get("prompt").is_none());
    }

    #[test]
    fn test_unrecognized_inputs_give_single_default() {
        let inputs = [
            json!(null),
            json!({}),
            json!("corrupted"),
            json!(42),
            json!({"promptGroups": "oops"}),
        ];

        for input in inputs {
            let config = migrator().normalize(&input);
            assert_eq!(config.groups.len(), 1, "input: {}", input);
            assert!(config.groups[0].is_default);
            assert_eq!(config.groups[0].prompt, DEFAULT);
            assert!(config.groups[0].rules.is_empty());
        }
    }

    #[test]
    fn test_load_missing_blob_is_first_run() {
        let config = migrator().load(None);
        assert_eq!(config.groups.len(), 1);
        assert!(config.groups[0].is_default);
    }

    #[test]
    fn test_canonical_normalization_idempotent() {
        let mut migrator = migrator();
        let input = json!({
            "promptGroups": [
                {"id": "g1", "prompt": "rule-1", "isDefault": false, "cssSelector": "",
                 "rules": [{"id": "r1", "urlPattern": "*.github.com\nexample.com", "cssSelector": ""}]},
                {"id": "g2", "prompt": "default", "isDefault": true, "cssSelector": "#main", "rules": []}
            ]
        });

        let first = migrator.normalize(&input);
        let second = migrator.normalize(&first.to_value().unwrap());
        assert_eq!(first, second);
        assert_eq!(first.to_value().unwrap(), input);
    }

    #[test]
    fn test_migrated_legacy_is_stable_after_first_pass() {
        let mut migrator = migrator();
        let first = migrator.normalize(&json!({
            "ruleGroups": [{"prompt": "A", "rules": [{"urlPattern": "a.com"}], "extra": 1}]
        }));
        let second = migrator.normalize(&first.to_value().unwrap());
        let third = migrator.normalize(&second.to_value().unwrap());
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_normalize_config_repairs_in_memory_edits() {
        let mut migrator = migrator();
        let config = Configuration::new(vec![Group::new_custom(
            "",
            "A",
            vec![Rule::empty("r1"), Rule::empty("r1")],
        )]);

        let repaired = migrator.normalize_config(config);
        assert!(!repaired.groups[0].id.is_empty());
        assert_ne!(repaired.groups[0].rules[0].id, repaired.groups[0].rules[1].id);
        assert_eq!(default_count(&repaired), 1);
    }

    #[test]
    fn test_synthesized_default_avoids_taken_ids() {
        let mut migrator = migrator();
        let config = migrator.normalize(&json!({
            "promptGroups": [{"id": "id-1", "prompt": "A", "rules": [{"id": "id-2"}]}]
        }));

        let default = config.default_group().unwrap();
        assert_ne!(default.id, "id-1");
        assert_ne!(default.id, "id-2");
    }

    #[test]
    fn test_repeating_id_generator_still_yields_unique_ids() {
        let mut migrator = Migrator::new("p", || "x".to_string());
        let config = migrator.normalize(&json!({
            "promptGroups": [{"prompt": "A", "rules": [{}]}, {"prompt": "B"}]
        }));

        let mut ids: Vec<&str> = config.groups.iter().map(|g| g.id.as_str()).collect();
        ids.extend(config.groups.iter().flat_map(|g| g.rules.iter().map(|r| r.id.as_str())));
        assert_eq!(ids.len(), 4);
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.contains(&"x"));
        assert!(ids.contains(&"x-1"));
    }

    #[test]
    fn test_empty_id_generator_still_yields_unique_ids() {
        let mut migrator = Migrator::new("p", String::new);
        let config = migrator.normalize(&json!([{"urlPattern": "a.com", "prompt": "A"}]));

        assert_eq!(config.groups.len(), 2);
        assert_ne!(config.groups[0].id, config.groups[1].id);
        assert!(config.groups.iter().all(|g| !g.id.is_empty()));
    }
}
