//! Condition AST definitions
//!
//! A legacy domain list is parsed into a [`ConditionNode`] tree which is
//! rendered separately, so parsing and output formatting can be tested on
//! their own.

pub mod condition;
pub mod operator;
pub mod value;

pub use condition::{Comparison, ConditionNode};
pub use operator::Operator;
pub use value::Value;
