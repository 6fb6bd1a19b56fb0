use crate::settings::types::Settings;
use crate::settings::validation::validate;
use crate::SettingsResult;
use std::path::Path;

/// Loads and parses a settings file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded and validated settings
/// * `Err(SettingsError)` - Failed to read, parse, or validate the settings
pub fn load_settings(path: &Path) -> SettingsResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Parses and validates settings from TOML text
///
/// # Example
///
/// ```
/// use page_prompt::settings::parse_settings;
///
/// let settings = parse_settings(r#"default-prompt = "Explain this page""#).unwrap();
/// assert_eq!(settings.default_prompt, "Explain this page");
/// ```
pub fn parse_settings(content: &str) -> SettingsResult<Settings> {
    let settings: Settings = toml::from_str(content)?;
    validate(&settings)?;
    Ok(settings)
}

/// Loads settings from `path` when given, otherwise returns the defaults
pub fn load_settings_or_default(path: Option<&Path>) -> SettingsResult<Settings> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(Settings::default()),
    }
}
