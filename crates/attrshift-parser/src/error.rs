//! Parser error types

use attrshift_core::CoreError;
use thiserror::Error;

/// Parser error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Nothing left to parse
    #[error("Empty expression")]
    EmptyExpression,

    /// Operator marker without operands (e.g. `['|']`)
    #[error("Operator '{marker}' has no operands")]
    MissingOperand { marker: char },

    /// Triple that does not split into field, operator and value
    #[error("Malformed triple: {0}")]
    MalformedTriple(String),

    /// Brackets or quotes do not balance
    #[error("Unbalanced brackets or quotes in: {0}")]
    UnbalancedBrackets(String),

    /// attrs dictionary that cannot be read
    #[error("Invalid attrs dictionary: {0}")]
    InvalidAttrs(String),

    /// Invalid tree node
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
