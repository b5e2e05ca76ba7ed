//! Error types for attrshift core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Empty {0} group")]
    EmptyGroup(&'static str),

    #[error("Invalid field name: {0:?}")]
    InvalidField(String),

    #[error("Operator {operator} expects {expected} value")]
    ValueMismatch {
        operator: String,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
