//! attrshift parser - legacy view attribute syntax to condition trees
//!
//! This crate turns the deprecated `attrs="{'invisible': [...]}"` and
//! `states="a,b"` attribute values into [`attrshift_core::ConditionNode`]
//! trees and renders them in the inline-expression syntax.

pub mod attrs;
pub mod condition_parser;
pub mod error;
pub mod splitter;
pub mod states;

// Re-export main parser types
pub use attrs::AttrsParser;
pub use condition_parser::{convert_condition, ConditionParser};
pub use error::{ParseError, Result};
pub use splitter::{split_conditions, split_top_level};
pub use states::{convert_states, states_condition};
