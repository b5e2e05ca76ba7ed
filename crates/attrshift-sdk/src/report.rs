//! Exportable conversion report

use crate::converter::ConversionOutcome;
use crate::error::Result;
use attrshift_core::{ConversionKind, ConversionRecord, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conversion counts per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: usize,
    pub attrs: usize,
    pub states: usize,
}

impl Statistics {
    pub fn from_records(records: &[ConversionRecord]) -> Self {
        let count = |kind: ConversionKind| records.iter().filter(|r| r.kind == kind).count();
        Self {
            total: records.len(),
            attrs: count(ConversionKind::Condition),
            states: count(ConversionKind::AllowedStates),
        }
    }
}

/// Report of one conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub timestamp: DateTime<Utc>,
    pub statistics: Statistics,
    pub conversions: Vec<ConversionRecord>,
    pub validation_errors: Vec<ValidationError>,
}

impl ConversionReport {
    /// Report for `outcome`, stamped now
    pub fn new(outcome: &ConversionOutcome) -> Self {
        Self::at(outcome, Utc::now())
    }

    /// Report for `outcome` with an explicit timestamp
    pub fn at(outcome: &ConversionOutcome, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            statistics: outcome.statistics(),
            conversions: outcome.conversions.clone(),
            validation_errors: outcome.validation_errors.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the report, as YAML for `.yaml` / `.yml` paths and JSON otherwise
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| matches!(ext.to_ascii_lowercase().as_str(), "yaml" | "yml"));

        let body = if is_yaml {
            self.to_yaml()?
        } else {
            self.to_json_pretty()?
        };
        std::fs::write(path, body)?;
        tracing::info!("Conversion report written to {}", path.display());
        Ok(())
    }
}
