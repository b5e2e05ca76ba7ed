//! Condition tree nodes and their inline-expression rendering

use super::operator::Operator;
use super::value::Value;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single `(field, operator, value)` triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Field name (e.g., "state" or "partner_id.country_id")
    pub field: String,
    /// Comparison operator
    pub operator: Operator,
    /// Value to compare against
    pub value: Value,
}

impl Comparison {
    /// Create a comparison.
    ///
    /// Rejects an empty field name, and a list value under an operator other
    /// than `in` / `not in`. A membership test with a scalar value is kept.
    pub fn new(field: impl Into<String>, operator: Operator, value: Value) -> Result<Self> {
        let field = field.into();
        if field.trim().is_empty() || field.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidField(field));
        }
        if value.is_list() && !operator.is_membership() {
            return Err(CoreError::ValueMismatch {
                operator: operator.to_string(),
                expected: "a scalar",
            });
        }
        Ok(Self {
            field,
            operator,
            value,
        })
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

/// Condition AST node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionNode {
    /// Leaf comparison
    Comparison(Comparison),

    /// Negation of the inner condition
    Not(Box<ConditionNode>),

    /// Conjunction. `implicit` marks a bare list of triples with no `&` marker.
    And {
        parts: Vec<ConditionNode>,
        implicit: bool,
    },

    /// Disjunction
    Or(Vec<ConditionNode>),
}

impl ConditionNode {
    /// Create a leaf node
    pub fn comparison(comparison: Comparison) -> Self {
        ConditionNode::Comparison(comparison)
    }

    /// Create a negation
    pub fn not(inner: ConditionNode) -> Self {
        ConditionNode::Not(Box::new(inner))
    }

    /// Create an explicit (`'&'`) conjunction
    pub fn and(parts: Vec<ConditionNode>) -> Result<Self> {
        if parts.is_empty() {
            return Err(CoreError::EmptyGroup("and"));
        }
        Ok(ConditionNode::And {
            parts,
            implicit: false,
        })
    }

    /// Create the conjunction of a bare triple list
    pub fn implicit_and(parts: Vec<ConditionNode>) -> Result<Self> {
        if parts.is_empty() {
            return Err(CoreError::EmptyGroup("and"));
        }
        Ok(ConditionNode::And {
            parts,
            implicit: true,
        })
    }

    /// Create a disjunction
    pub fn or(parts: Vec<ConditionNode>) -> Result<Self> {
        if parts.is_empty() {
            return Err(CoreError::EmptyGroup("or"));
        }
        Ok(ConditionNode::Or(parts))
    }

    /// Number of comparisons in the tree
    pub fn comparison_count(&self) -> usize {
        match self {
            ConditionNode::Comparison(_) => 1,
            ConditionNode::Not(inner) => inner.comparison_count(),
            ConditionNode::And { parts, .. } | ConditionNode::Or(parts) => {
                parts.iter().map(ConditionNode::comparison_count).sum()
            }
        }
    }

    /// Render into the inline-expression syntax
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, false);
        out
    }

    fn render_into(&self, out: &mut String, nested: bool) {
        match self {
            ConditionNode::Comparison(c) => out.push_str(&c.to_string()),
            ConditionNode::Not(inner) => {
                out.push_str("not (");
                inner.render_into(out, false);
                out.push(')');
            }
            ConditionNode::And { parts, implicit } => {
                let wrap = !*implicit || nested;
                Self::render_group(out, parts, " and ", wrap);
            }
            ConditionNode::Or(parts) => Self::render_group(out, parts, " or ", true),
        }
    }

    fn render_group(out: &mut String, parts: &[ConditionNode], sep: &str, wrap: bool) {
        if wrap {
            out.push('(');
        }
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            part.render_into(out, true);
        }
        if wrap {
            out.push(')');
        }
    }
}

impl fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(field: &str, op: Operator, value: Value) -> ConditionNode {
        ConditionNode::comparison(Comparison::new(field, op, value).unwrap())
    }

    #[test]
    fn test_render_comparison() {
        let node = cmp("state", Operator::Ne, Value::string("pending"));
        assert_eq!(node.render(), "state != 'pending'");
    }

    #[test]
    fn test_render_or_is_parenthesized() {
        let node = ConditionNode::or(vec![
            cmp("state", Operator::Ne, Value::string("pending")),
            cmp("provider_id", Operator::Ne, Value::CurrentUser),
        ])
        .unwrap();
        assert_eq!(node.render(), "(state != 'pending' or provider_id != uid)");
    }

    #[test]
    fn test_render_implicit_and_at_top_level() {
        let node = ConditionNode::implicit_and(vec![
            cmp("a", Operator::Eq, Value::Number("1".into())),
            cmp("b", Operator::Eq, Value::Bool(true)),
        ])
        .unwrap();
        assert_eq!(node.render(), "a == 1 and b == true");
    }

    #[test]
    fn test_render_implicit_and_nested_keeps_precedence() {
        let inner = ConditionNode::implicit_and(vec![
            cmp("a", Operator::Eq, Value::Number("1".into())),
            cmp("b", Operator::Eq, Value::Number("2".into())),
        ])
        .unwrap();
        let node = ConditionNode::or(vec![inner, cmp("c", Operator::Eq, Value::Number("3".into()))])
            .unwrap();
        assert_eq!(node.render(), "((a == 1 and b == 2) or c == 3)");
    }

    #[test]
    fn test_render_not() {
        let node = ConditionNode::not(cmp("active", Operator::Eq, Value::Bool(false)));
        assert_eq!(node.render(), "not (active == false)");
        assert_eq!(node.comparison_count(), 1);
    }

    #[test]
    fn test_empty_group_rejected() {
        assert_eq!(ConditionNode::or(vec![]), Err(CoreError::EmptyGroup("or")));
        assert!(ConditionNode::and(vec![]).is_err());
    }

    #[test]
    fn test_invalid_field_rejected() {
        assert!(Comparison::new("", Operator::Eq, Value::Bool(true)).is_err());
        assert!(Comparison::new("two words", Operator::Eq, Value::Bool(true)).is_err());
    }

    #[test]
    fn test_list_value_needs_membership_operator() {
        assert_eq!(
            Comparison::new("state", Operator::Eq, Value::list(["done"])),
            Err(CoreError::ValueMismatch {
                operator: "==".to_string(),
                expected: "a scalar",
            })
        );
        assert!(Comparison::new("state", Operator::NotIn, Value::list(["done"])).is_ok());
        assert!(Comparison::new("state", Operator::In, Value::string("done")).is_ok());
    }
}
