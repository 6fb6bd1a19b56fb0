use crate::settings::types::Settings;
use crate::{SettingsError, SettingsResult};

/// Validates the entire settings structure
pub fn validate(settings: &Settings) -> SettingsResult<()> {
    validate_default_prompt(&settings.default_prompt)?;
    Ok(())
}

fn validate_default_prompt(prompt: &str) -> SettingsResult<()> {
    if prompt.trim().is_empty() {
        return Err(SettingsError::Validation(
            "default-prompt cannot be empty".to_string(),
        ));
    }

    Ok(())
}
