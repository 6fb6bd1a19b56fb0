//! Settings module for Page-Prompt
//!
//! This module handles loading, parsing, and validating the optional TOML
//! settings file.
//!
//! # Example
//!
//! ```no_run
//! use page_prompt::settings::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("page-prompt.toml")).unwrap();
//! println!("Default prompt: {}", settings.default_prompt);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::Settings;

// Re-export parser functions
pub use parser::{load_settings, load_settings_or_default, parse_settings};
