//! Integration tests for the configuration lifecycle
//!
//! These tests run a stored configuration through the full cycle: load and
//! migrate from the store, match URLs, edit, normalize, save, and reload.

use page_prompt::pattern::parse_patterns;
use page_prompt::rules::{CompiledRules, Configuration, MatchResult, Migrator, SequentialIds};
use page_prompt::settings::parse_settings;
use page_prompt::storage::{
    load_configuration, save_configuration, save_if_changed, ConfigStore, MemoryStore,
    CANONICAL_CONFIG_KEY, GROUPED_CONFIG_KEY, LEGACY_RULES_KEY,
};
use page_prompt::{match_url, normalize_pattern};
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

const BUILT_IN: &str = "built-in prompt";

fn migrator() -> Migrator<SequentialIds> {
    Migrator::new(BUILT_IN, SequentialIds::new("g-"))
}

/// Creates a store holding only the legacy flat rule array
fn legacy_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store
        .set(
            LEGACY_RULES_KEY,
            json!([
                {"id": "1", "urlPattern": "*.github.com\nexample.com", "cssSelector": "", "prompt": "rule-1"},
                {"id": "2", "urlPattern": "wallstreetcn.com/livenews", "cssSelector": ".article", "prompt": "rule-2"},
                {"id": "3", "urlPattern": "*", "cssSelector": "#content", "prompt": "default"}
            ]),
        )
        .unwrap();
    store
}

fn prompts(config: &Configuration) -> Vec<&str> {
    config.groups.iter().map(|g| g.prompt.as_str()).collect()
}

#[test]
fn test_legacy_store_migrates_and_matches() {
    let store = legacy_store();
    let config = load_configuration(&store, &mut migrator());

    assert_eq!(prompts(&config), vec!["rule-1", "rule-2", "default"]);
    let default = config.default_group().unwrap();
    assert_eq!(default.id, "3");
    assert_eq!(default.css_selector, "#content");
    assert!(default.rules.is_empty());

    assert_eq!(
        match_url("https://docs.github.com/en", &config, BUILT_IN),
        MatchResult::new("rule-1", "")
    );
    assert_eq!(
        match_url("https://example.com/about", &config, BUILT_IN),
        MatchResult::new("rule-1", "")
    );
    assert_eq!(
        match_url("https://wallstreetcn.com/livenews/3055332", &config, BUILT_IN),
        MatchResult::new("rule-2", ".article")
    );
    assert_eq!(
        match_url("https://news.ycombinator.com/", &config, BUILT_IN),
        MatchResult::new("default", "#content")
    );
}

#[test]
fn test_save_moves_to_canonical_key() {
    let mut store = legacy_store();
    let config = load_configuration(&store, &mut migrator());

    assert!(save_if_changed(&mut store, &config).unwrap());
    assert!(store.contains_key(CANONICAL_CONFIG_KEY));
    assert!(!store.contains_key(LEGACY_RULES_KEY));
    assert_eq!(store.len(), 1);

    // Second save is a no-op
    assert!(!save_if_changed(&mut store, &config).unwrap());

    // Reload gives the same configuration, ids included
    let reloaded = load_configuration(&store, &mut migrator());
    assert_eq!(reloaded, config);
}

#[test]
fn test_grouped_store_upgraded() {
    let mut store = MemoryStore::new();
    store
        .set(
            GROUPED_CONFIG_KEY,
            json!({"ruleGroups": [
                {"id": "a", "prompt": "P", "rules": [{"id": "r", "urlPattern": "example.com"}]}
            ]}),
        )
        .unwrap();

    let config = load_configuration(&store, &mut migrator());
    assert_eq!(config.groups.len(), 2);
    assert_eq!(config.groups[0].id, "a");
    assert_eq!(config.groups[0].rules[0].css_selector, "");
    assert_eq!(config.groups[1].prompt, BUILT_IN);
    assert!(config.groups[1].is_default);

    save_configuration(&mut store, &config).unwrap();
    assert!(!store.contains_key(GROUPED_CONFIG_KEY));
    assert_eq!(
        store.get(CANONICAL_CONFIG_KEY).unwrap(),
        Some(config.to_value().unwrap())
    );
}

#[test]
fn test_canonical_key_wins_over_legacy() {
    let mut store = legacy_store();
    store
        .set(
            CANONICAL_CONFIG_KEY,
            json!({"promptGroups": [
                {"id": "d", "prompt": "current", "isDefault": true, "cssSelector": "", "rules": []}
            ]}),
        )
        .unwrap();

    let config = load_configuration(&store, &mut migrator());
    assert_eq!(prompts(&config), vec!["current"]);
}

#[test]
fn test_empty_store_uses_settings_prompt() {
    let settings = parse_settings(r#"default-prompt = "Explain this page""#).unwrap();
    let store = MemoryStore::new();
    let mut migrator = Migrator::new(settings.default_prompt.clone(), SequentialIds::new("g-"));

    let config = load_configuration(&store, &mut migrator);
    assert_eq!(config.groups.len(), 1);
    assert_eq!(config.groups[0].prompt, "Explain this page");
    assert!(config.groups[0].is_default);

    let result = match_url("https://example.com/", &config, &settings.default_prompt);
    assert_eq!(result, MatchResult::new("Explain this page", ""));
}

#[test]
fn test_edit_save_reload_cycle() {
    let mut store = legacy_store();
    let mut migrator = migrator();
    let mut config = load_configuration(&store, &mut migrator);

    let mut ids = SequentialIds::new("new-");
    let group_id = config.add_group("hacker news", &mut ids);
    let rule_id = config.groups[0].rules[0].id.clone();
    config
        .update_rule_pattern(&group_id, &rule_id, "news.ycombinator.com\n\n*.lobste.rs")
        .unwrap();
    config.update_rule_selector(&group_id, &rule_id, ".comment").unwrap();

    let config = migrator.normalize_config(config);
    assert!(save_if_changed(&mut store, &config).unwrap());

    let reloaded = load_configuration(&store, &mut Migrator::new(BUILT_IN, SequentialIds::new("x-")));
    assert_eq!(reloaded, config);
    assert_eq!(prompts(&reloaded)[0], "hacker news");

    let compiled = CompiledRules::new(&reloaded, BUILT_IN);
    assert_eq!(
        compiled.find("https://news.ycombinator.com/item?id=1"),
        &MatchResult::new("hacker news", ".comment")
    );
    assert_eq!(
        compiled.find("https://lobste.rs/"),
        &MatchResult::new("hacker news", ".comment")
    );
    assert!(compiled.invalid_patterns().is_empty());
}

#[test]
fn test_deleting_all_custom_groups_leaves_default() {
    let store = legacy_store();
    let mut config = load_configuration(&store, &mut migrator());

    let custom: Vec<String> = config.custom_groups().map(|g| g.id.clone()).collect();
    for id in &custom {
        config.delete_group(id).unwrap();
    }
    assert!(config.delete_group("3").is_err());

    assert_eq!(config.groups.len(), 1);
    assert_eq!(
        match_url("https://docs.github.com/", &config, BUILT_IN),
        MatchResult::new("default", "#content")
    );
}

#[test]
fn test_store_snapshot_file_roundtrip() {
    let mut store = legacy_store();
    let config = load_configuration(&store, &mut migrator());
    save_configuration(&mut store, &config).unwrap();

    let mut file = NamedTempFile::new().unwrap();
    let text = serde_json::to_string_pretty(&store.snapshot()).unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();

    let content = std::fs::read_to_string(file.path()).unwrap();
    let snapshot: Value = serde_json::from_str(&content).unwrap();
    let restored = MemoryStore::from_snapshot(snapshot).unwrap();

    assert_eq!(restored, store);
    assert_eq!(load_configuration(&restored, &mut migrator()), config);
}

#[test]
fn test_user_typed_patterns() {
    let text = "  github.com  \n\nhttps://*.example.org/docs\nfile:///home/*";
    let normalized: Vec<String> = parse_patterns(text).into_iter().map(normalize_pattern).collect();

    assert_eq!(
        normalized,
        vec![
            "*://github.com/*",
            "https://*.example.org/docs*",
            "file:///home/*",
        ]
    );
}
