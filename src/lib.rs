//! Page-Prompt: URL rule matching for page-aware prompts
//!
//! This crate picks the prompt template (and optional content selector) that
//! applies to the page a user is viewing. Users keep an ordered list of rule
//! groups; each group owns a prompt and a list of URL match patterns. The
//! crate also upgrades persisted rule configurations from every historical
//! storage shape into the current one.

pub mod pattern;
pub mod rules;
pub mod settings;
pub mod storage;

use thiserror::Error;

/// Prompt used when no configured group supplies one
pub const DEFAULT_PROMPT: &str = "Summarize the main points of this page.";

/// Main error type for Page-Prompt operations
#[derive(Debug, Error)]
pub enum PagePromptError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Store error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings-file errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Reasons a URL match pattern is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("Missing scheme separator in pattern: {0}")]
    MissingScheme(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid host: {0}")]
    InvalidHost(String),

    #[error("Missing path in pattern: {0}")]
    MissingPath(String),

    #[error("Pattern could not be compiled: {0}")]
    Compile(String),
}

/// Errors raised by id-addressed configuration edits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Rule {rule_id} not found in group {group_id}")]
    RuleNotFound { group_id: String, rule_id: String },

    #[error("The default group cannot be changed this way: {0}")]
    DefaultGroupLocked(String),

    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type alias for Page-Prompt operations
pub type Result<T> = std::result::Result<T, PagePromptError>;

/// Result type alias for settings operations
pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

/// Result type alias for configuration edits
pub type EditResult<T> = std::result::Result<T, EditError>;

// Re-export commonly used types
pub use pattern::{compile_pattern, normalize_pattern, UrlMatcher};
pub use rules::{match_url, Configuration, Group, MatchResult, Migrator, Rule};
pub use settings::Settings;
