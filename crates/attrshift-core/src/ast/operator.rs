//! Comparison operators of a domain triple

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (`=` in legacy domains, `==` in expressions)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
    /// In (element in list)
    In,
    /// Not in
    NotIn,
    /// Any other domain operator (`ilike`, `child_of`, ...), emitted as written
    Other(String),
}

impl Operator {
    /// Map a legacy domain operator token (quotes already stripped)
    pub fn from_legacy(token: &str) -> Self {
        match token.trim() {
            "=" | "==" => Operator::Eq,
            "!=" | "<>" => Operator::Ne,
            ">" => Operator::Gt,
            ">=" => Operator::Ge,
            "<" => Operator::Lt,
            "<=" => Operator::Le,
            "in" => Operator::In,
            "not in" => Operator::NotIn,
            other => Operator::Other(other.to_string()),
        }
    }

    /// Token used in the inline-expression syntax
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Other(op) => op,
        }
    }

    /// Returns true for `in` / `not in`
    pub fn is_membership(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// Returns true for the ordering operators
    pub fn is_ordering(&self) -> bool {
        matches!(self, Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
