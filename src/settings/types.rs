use crate::DEFAULT_PROMPT;
use serde::Deserialize;

/// Settings for the Page-Prompt tools
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Prompt used when a configuration supplies none
    #[serde(rename = "default-prompt", default = "default_prompt")]
    pub default_prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_prompt: default_prompt(),
        }
    }
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}
