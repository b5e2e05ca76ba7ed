//! Literal values on the right-hand side of a comparison

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier standing for the acting user in both syntaxes
pub const CURRENT_USER: &str = "uid";

/// Comparison value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// String literal, rendered single-quoted
    String(String),
    /// Boolean literal, rendered `true` / `false`
    Bool(bool),
    /// Numeric literal, kept as written
    Number(String),
    /// The bare `uid` marker
    CurrentUser,
    /// Membership list, every item rendered as a string literal
    List(Vec<String>),
}

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Create a list value
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns true if this is a list value
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }
}

/// Quote `s` as a single-quoted string literal
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(&quote(s)),
            Value::Bool(true) => f.write_str("true"),
            Value::Bool(false) => f.write_str("false"),
            Value::Number(n) => f.write_str(n),
            Value::CurrentUser => f.write_str(CURRENT_USER),
            Value::List(items) => {
                let quoted: Vec<String> = items.iter().map(|item| quote(item)).collect();
                write!(f, "({})", quoted.join(", "))
            }
        }
    }
}
