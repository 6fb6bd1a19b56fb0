//! Rule configuration module for Page-Prompt
//!
//! This module holds the rule data model, the matcher that picks a prompt for
//! a URL, the migrator that upgrades persisted configurations, and the
//! id-addressed editing operations.

mod editor;
mod ids;
mod matcher;
mod migrate;
mod types;

// Re-export types
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use matcher::{match_url, CompiledRules, InvalidPattern};
pub use migrate::{Migrator, PersistedShape, PROMPT_GROUPS_KEY, RULE_GROUPS_KEY};
pub use types::{fingerprint_value, Configuration, Group, MatchResult, Rule};
