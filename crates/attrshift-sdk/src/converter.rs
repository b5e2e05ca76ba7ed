//! Whole-document conversion
//!
//! Every legacy fragment is located in the original text, converted on its
//! own, and substituted for its first exact occurrence in the output buffer.
//! `attrs` fragments are handled first, then `states` fragments, each in
//! document order. A fragment that fails to convert is left as written.

use crate::builder::DocumentConverterBuilder;
use crate::config::ConverterConfig;
use crate::error::Result;
use crate::markup::{cleanup_deprecated_widgets, escape_attr, unescape_attr, validate_markup};
use crate::notify::{Notifier, Severity, TracingNotifier};
use crate::report::{ConversionReport, Statistics};
use attrshift_core::{ConversionKind, ConversionRecord, ValidationError};
use attrshift_parser::{states_condition, AttrsParser};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

static ATTRS_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\battrs="(\{[^}]*\})""#).expect("valid attrs regex"));
static STATES_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bstates="([^"]+)""#).expect("valid states regex"));

/// A legacy fragment that was found but left unconverted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFragment {
    pub fragment: String,
    pub reason: String,
}

/// Result of converting one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    /// Rewritten text
    pub output: String,
    /// One record per substitution, attrs first then states
    pub conversions: Vec<ConversionRecord>,
    /// Findings of the input validation
    pub validation_errors: Vec<ValidationError>,
    /// Fragments found but not converted
    pub skipped: Vec<SkippedFragment>,
}

impl ConversionOutcome {
    /// Count conversions per kind
    pub fn statistics(&self) -> Statistics {
        Statistics::from_records(&self.conversions)
    }

    /// Build the exportable report, stamped with the current time
    pub fn report(&self) -> ConversionReport {
        ConversionReport::new(self)
    }

    /// Write the converted text to `path`
    pub fn write_output(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.output)?;
        tracing::debug!("Wrote converted markup to {}", path.as_ref().display());
        Ok(())
    }
}

/// Converts legacy `attrs` / `states` attributes of a view document
pub struct DocumentConverter {
    config: ConverterConfig,
    notifier: Arc<dyn Notifier>,
}

impl DocumentConverter {
    /// Converter with the default configuration
    pub fn new() -> Self {
        Self::from_parts(ConverterConfig::default(), Arc::new(TracingNotifier))
    }

    /// Create a builder
    pub fn builder() -> DocumentConverterBuilder {
        DocumentConverterBuilder::new()
    }

    pub(crate) fn from_parts(config: ConverterConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self { config, notifier }
    }

    /// Active configuration
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert every legacy fragment of `input`
    pub fn convert(&self, input: &str) -> ConversionOutcome {
        let validation_errors = if self.config.validate_input {
            validate_markup(input)
        } else {
            Vec::new()
        };
        if !validation_errors.is_empty() {
            self.notifier.notify(
                &format!("Validation errors found: {}", join_messages(&validation_errors)),
                Severity::Warning,
            );
        }

        let mut output = input.to_string();
        let mut conversions = Vec::new();
        let mut skipped = Vec::new();

        for caps in ATTRS_FRAGMENT.captures_iter(input) {
            let fragment = &caps[0];
            match self.convert_attrs(&caps[1]) {
                Ok(attributes) if attributes.is_empty() => {
                    skipped.push(SkippedFragment::new(fragment, "no convertible attrs key"));
                }
                Ok(attributes) => self.substitute(
                    &mut output,
                    fragment,
                    attributes,
                    ConversionKind::Condition,
                    &mut conversions,
                    &mut skipped,
                ),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", fragment, e);
                    skipped.push(SkippedFragment::new(fragment, e.to_string()));
                }
            }
        }

        for caps in STATES_FRAGMENT.captures_iter(input) {
            let fragment = &caps[0];
            match states_condition(&unescape_attr(&caps[1])) {
                Some(node) => {
                    let attribute = format!("invisible=\"{}\"", escape_attr(&node.render()));
                    self.substitute(
                        &mut output,
                        fragment,
                        attribute,
                        ConversionKind::AllowedStates,
                        &mut conversions,
                        &mut skipped,
                    );
                }
                None => skipped.push(SkippedFragment::new(fragment, "no state names")),
            }
        }

        let output = cleanup_deprecated_widgets(&output, &self.config.deprecated_widgets);

        self.notifier.notify(
            &format!("Successfully converted {} attributes", conversions.len()),
            Severity::Success,
        );

        ConversionOutcome {
            output,
            conversions,
            validation_errors,
            skipped,
        }
    }

    /// Validate a markup text and report the verdict through the notifier
    pub fn validate(&self, text: &str) -> Vec<ValidationError> {
        let errors = validate_markup(text);
        if errors.is_empty() {
            self.notifier.notify("Markup is valid", Severity::Success);
        } else {
            self.notifier.notify(
                &format!("Validation errors: {}", join_messages(&errors)),
                Severity::Danger,
            );
        }
        errors
    }

    /// Read a markup file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let is_xml = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("xml"));
        if !is_xml {
            self.notifier.notify(
                &format!("{} does not look like an XML file", path.display()),
                Severity::Warning,
            );
        }

        match std::fs::read_to_string(path) {
            Ok(text) => {
                self.notifier
                    .notify(&format!("Loaded {}", path.display()), Severity::Info);
                Ok(text)
            }
            Err(e) => {
                self.notifier.notify(
                    &format!("Error loading file: {}", e),
                    Severity::Danger,
                );
                Err(e.into())
            }
        }
    }

    /// `key="expression"` attributes for one attrs dictionary
    fn convert_attrs(&self, dict: &str) -> attrshift_parser::Result<String> {
        let pairs = AttrsParser::convert(&unescape_attr(dict), &self.config.attribute_keys)?;
        let escaped: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(key, expr)| (key, escape_attr(&expr)))
            .collect();
        Ok(AttrsParser::to_attributes(&escaped))
    }

    fn substitute(
        &self,
        output: &mut String,
        fragment: &str,
        replacement: String,
        kind: ConversionKind,
        conversions: &mut Vec<ConversionRecord>,
        skipped: &mut Vec<SkippedFragment>,
    ) {
        match find_attribute(output, fragment) {
            Some(start) => {
                output.replace_range(start..start + fragment.len(), &replacement);
                tracing::debug!("Converted {} -> {}", fragment, replacement);
                conversions.push(ConversionRecord::new(fragment, replacement, kind));
            }
            None => skipped.push(SkippedFragment::new(
                fragment,
                "fragment no longer present in output",
            )),
        }
    }
}

impl Default for DocumentConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl SkippedFragment {
    fn new(fragment: &str, reason: impl Into<String>) -> Self {
        Self {
            fragment: fragment.to_string(),
            reason: reason.into(),
        }
    }
}

/// First occurrence of `fragment` that starts a whole attribute name, so
/// `states="x"` does not match inside `x_states="x"`
fn find_attribute(haystack: &str, fragment: &str) -> Option<usize> {
    haystack
        .match_indices(fragment)
        .map(|(start, _)| start)
        .find(|&start| {
            haystack[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
        })
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
