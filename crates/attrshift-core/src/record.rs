//! Conversion records and validation findings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which legacy attribute form a conversion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionKind {
    /// `attrs="{'invisible': [...], ...}"`
    Condition,
    /// `states="draft,sent"`
    AllowedStates,
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionKind::Condition => f.write_str("condition"),
            ConversionKind::AllowedStates => f.write_str("allowed-states"),
        }
    }
}

/// One successful substitution in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRecord {
    /// Original fragment as it appeared in the source text
    pub from: String,
    /// Replacement fragment
    pub to: String,
    pub kind: ConversionKind,
}

impl ConversionRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: ConversionKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }
}

/// Non-fatal structural finding about a markup text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
