use crate::error::{Error, Result};
use crate::navigation::PathEncoding;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

static DEFAULT_CONFIG: Lazy<BindingConfig> = Lazy::new(|| BindingConfig {
    dropdown_class: "types-dropdown".to_string(),
    text_class: "type-text".to_string(),
    highlight_class: "type-highlight".to_string(),
    path_prefix: "/pokemon/".to_string(),
    encoding: PathEncoding::Raw,
});

/// Class names and navigation settings for a selection binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    pub dropdown_class: String,
    pub text_class: String,
    pub highlight_class: String,
    pub path_prefix: String,
    pub encoding: PathEncoding,
}

impl Default for BindingConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

impl BindingConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading binding config");
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Class names must be single non-empty tokens.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("dropdown_class", &self.dropdown_class),
            ("text_class", &self.text_class),
            ("highlight_class", &self.highlight_class),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidConfig(format!("{field} cannot be empty")));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(Error::InvalidConfig(format!(
                    "{field} must be a single class token, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}
