//! attrshift core - condition tree and records for legacy attribute conversion
//!
//! This crate provides the fundamental types shared by the parser, the
//! document converter and the command line:
//! - Condition AST (comparisons joined by `and` / `or` / `not`)
//! - Rendering of the AST into the inline-expression attribute syntax
//! - Conversion records and validation errors
//! - Error types

pub mod ast;
pub mod error;
pub mod record;

// Re-export commonly used types
pub use ast::{Comparison, ConditionNode, Operator, Value};
pub use error::CoreError;
pub use record::{ConversionKind, ConversionRecord, ValidationError};
