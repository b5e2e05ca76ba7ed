//! Builder pattern for DocumentConverter

use crate::config::ConverterConfig;
use crate::converter::DocumentConverter;
use crate::error::Result;
use crate::notify::{Notifier, TracingNotifier};
use std::sync::Arc;

/// Builder for DocumentConverter
///
/// # Example
///
/// ```rust,ignore
/// use attrshift_sdk::{DocumentConverterBuilder, MemoryNotifier};
/// use std::sync::Arc;
///
/// let converter = DocumentConverterBuilder::new()
///     .attribute_keys(["invisible", "readonly", "required", "column_invisible"])
///     .validate_input(false)
///     .with_notifier(Arc::new(MemoryNotifier::new()))
///     .build()?;
///
/// let outcome = converter.convert(&view_xml);
/// ```
pub struct DocumentConverterBuilder {
    config: ConverterConfig,
    notifier: Option<Arc<dyn Notifier>>,
}

impl DocumentConverterBuilder {
    /// Create a new builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ConverterConfig::default(),
            notifier: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the attrs keys to convert, in output order
    pub fn attribute_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.attribute_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Add a literal marker to strip from converted documents
    pub fn add_deprecated_widget(mut self, marker: impl Into<String>) -> Self {
        self.config.deprecated_widgets.push(marker.into());
        self
    }

    /// Enable or disable input validation
    pub fn validate_input(mut self, enabled: bool) -> Self {
        self.config.validate_input = enabled;
        self
    }

    /// Set the notification sink (default: [`TracingNotifier`])
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the converter
    pub fn build(self) -> Result<DocumentConverter> {
        self.config.validate()?;
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(TracingNotifier));
        Ok(DocumentConverter::from_parts(self.config, notifier))
    }
}

impl Default for DocumentConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let converter = DocumentConverterBuilder::new().build().unwrap();
        assert_eq!(converter.config(), &ConverterConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let converter = DocumentConverterBuilder::new()
            .attribute_keys(["invisible", "column_invisible"])
            .add_deprecated_widget("widget=\"legacy\"")
            .validate_input(false)
            .build()
            .unwrap();

        let config = converter.config();
        assert_eq!(config.attribute_keys, vec!["invisible", "column_invisible"]);
        assert_eq!(config.deprecated_widgets.len(), 4);
        assert!(!config.validate_input);
    }

    #[test]
    fn test_builder_rejects_empty_keys() {
        let result = DocumentConverterBuilder::new()
            .attribute_keys(Vec::<String>::new())
            .build();
        assert!(result.is_err());
    }
}
