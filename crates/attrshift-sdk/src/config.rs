//! Configuration types for DocumentConverter

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};

/// Document converter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// attrs keys converted into their own attribute, in output order
    pub attribute_keys: Vec<String>,

    /// Literal markers removed from the converted document
    pub deprecated_widgets: Vec<String>,

    /// Validate the input before converting
    pub validate_input: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            attribute_keys: vec![
                "invisible".to_string(),
                "readonly".to_string(),
                "required".to_string(),
            ],
            deprecated_widgets: vec![
                "widget=\"mail_followers\"".to_string(),
                "widget=\"mail_thread\"".to_string(),
                "widget=\"mail_activity\"".to_string(),
            ],
            validate_input: true,
        }
    }
}

impl ConverterConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.attribute_keys.is_empty() {
            return Err(SdkError::ConfigError(
                "attribute_keys must name at least one attrs key".to_string(),
            ));
        }
        if let Some(key) = self
            .attribute_keys
            .iter()
            .find(|k| k.is_empty() || !k.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        {
            return Err(SdkError::ConfigError(format!(
                "invalid attribute key {:?}",
                key
            )));
        }
        if self.deprecated_widgets.iter().any(String::is_empty) {
            return Err(SdkError::ConfigError(
                "deprecated_widgets entries must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
