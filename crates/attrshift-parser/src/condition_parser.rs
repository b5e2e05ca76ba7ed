//! Legacy domain condition parser
//!
//! Parses the bracketed domain lists found in deprecated `attrs` values:
//! - `[('state', '!=', 'pending')]`
//! - `['|', ('state', '!=', 'pending'), ('provider_id', '!=', uid)]`
//! - `['!', ('active', '=', True)]`
//! - `[('a', '=', 1), ('b', 'in', ['x', 'y'])]` (implicit AND)
//!
//! A leading quoted `|`, `&` or `!` applies to every remaining item of the
//! list; a bare list of triples means all of them must hold.

use crate::error::{ParseError, Result};
use crate::splitter::{
    check_balanced, split_conditions, split_top_level, strip_enclosing, strip_quotes,
};
use attrshift_core::ast::{Comparison, ConditionNode, Operator, Value};

/// Legacy domain parser
pub struct ConditionParser;

impl ConditionParser {
    /// Parse a bracketed domain list into a condition tree
    pub fn parse(raw: &str) -> Result<ConditionNode> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseError::EmptyExpression);
        }
        check_balanced(raw)?;

        let node = Self::parse_group(strip_enclosing(raw, '[', ']'))?;
        log::debug!("Parsed {} comparison(s) from {}", node.comparison_count(), raw);
        Ok(node)
    }

    /// Parse the contents of a list (outer brackets already removed)
    fn parse_group(segment: &str) -> Result<ConditionNode> {
        let segment = segment.trim();
        if segment.is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        if let Some(rest) = strip_marker(segment, '|') {
            let operands = Self::parse_operands(rest, '|')?;
            return Ok(ConditionNode::or(operands)?);
        }

        if let Some(rest) = strip_marker(segment, '&') {
            let operands = Self::parse_operands(rest, '&')?;
            return Ok(ConditionNode::and(operands)?);
        }

        if let Some(rest) = strip_marker(segment, '!') {
            if rest.is_empty() {
                return Err(ParseError::MissingOperand { marker: '!' });
            }
            return Ok(ConditionNode::not(Self::parse_group(rest)?));
        }

        let top_level = split_top_level(segment);
        if top_level.len() == 1 {
            if segment.starts_with('(') && segment.ends_with(')') {
                return Ok(ConditionNode::comparison(Self::parse_comparison(segment)?));
            }
            if segment.starts_with('[') && segment.ends_with(']') {
                return Self::parse(segment);
            }
        }

        let parts = split_conditions(segment);
        if parts.len() > 1 {
            let operands = parts
                .iter()
                .map(|part| Self::parse_operand(part))
                .collect::<Result<Vec<_>>>()?;
            return Ok(ConditionNode::implicit_and(operands)?);
        }

        Ok(ConditionNode::comparison(Self::parse_comparison(segment)?))
    }

    /// Operands of a `'|'` / `'&'` group, each parsed recursively
    fn parse_operands(rest: &str, marker: char) -> Result<Vec<ConditionNode>> {
        let parts = split_top_level(rest);
        if parts.is_empty() {
            return Err(ParseError::MissingOperand { marker });
        }
        parts.iter().map(|part| Self::parse_group(part)).collect()
    }

    /// Item of an implicit-AND list: a triple or a nested list
    fn parse_operand(part: &str) -> Result<ConditionNode> {
        let part = part.trim();
        if part.starts_with('[') && part.ends_with(']') {
            return Self::parse(part);
        }
        Ok(ConditionNode::comparison(Self::parse_comparison(part)?))
    }

    /// Parse one `(field, operator, value)` triple
    pub fn parse_comparison(raw: &str) -> Result<Comparison> {
        let inner = strip_enclosing(raw, '(', ')');
        let parts = split_conditions(inner);
        if parts.len() != 3 {
            return Err(ParseError::MalformedTriple(raw.trim().to_string()));
        }

        let field = strip_quotes(&parts[0]);
        let operator = Operator::from_legacy(strip_quotes(&parts[1]));
        let raw_value = parts[2].trim();

        let is_list = raw_value.starts_with('[') || raw_value.starts_with('(');
        let value = if operator.is_membership() && is_list {
            Value::List(Self::parse_list(raw_value))
        } else {
            Self::parse_value(raw_value)
        };

        Comparison::new(field, operator, value)
            .map_err(|_| ParseError::MalformedTriple(raw.trim().to_string()))
    }

    /// Parse a scalar value token
    ///
    /// Quoted tokens are strings whatever their content. Unquoted `True` /
    /// `False` are booleans, unquoted `uid` is the current user, unquoted
    /// numerics stay numbers and anything else becomes a string.
    pub fn parse_value(token: &str) -> Value {
        let token = token.trim();
        let unquoted = strip_quotes(token);
        if unquoted.len() != token.len() {
            return Value::String(unquoted.to_string());
        }

        match token {
            "True" | "true" => Value::Bool(true),
            "False" | "false" => Value::Bool(false),
            "uid" => Value::CurrentUser,
            _ if is_numeric(token) => Value::Number(token.to_string()),
            _ => Value::String(token.to_string()),
        }
    }

    /// Items of a `[...]` or `(...)` list, quotes stripped
    fn parse_list(raw: &str) -> Vec<String> {
        let raw = raw.trim();
        let inner = if raw.starts_with('[') {
            strip_enclosing(raw, '[', ']')
        } else {
            strip_enclosing(raw, '(', ')')
        };
        split_top_level(inner)
            .iter()
            .map(|item| strip_quotes(item).to_string())
            .collect()
    }
}

/// Convert a legacy domain into an inline expression.
///
/// Input that cannot be parsed is returned trimmed but otherwise unchanged.
pub fn convert_condition(raw: &str) -> String {
    match ConditionParser::parse(raw) {
        Ok(node) => node.render(),
        Err(e) => {
            log::warn!("Leaving condition unconverted: {}", e);
            raw.trim().to_string()
        }
    }
}

/// Strip a leading quoted operator marker (`'|'`), and the comma after it
fn strip_marker(segment: &str, marker: char) -> Option<&str> {
    let mut chars = segment.chars();
    let quote = chars.next().filter(|c| *c == '\'' || *c == '"')?;
    if chars.next() != Some(marker) || chars.next() != Some(quote) {
        return None;
    }
    let rest = chars.as_str().trim_start();
    let rest = rest.strip_prefix(',').unwrap_or(rest);
    Some(rest.trim())
}

fn is_numeric(token: &str) -> bool {
    let starts_numeric = token
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'));
    starts_numeric && token.parse::<f64>().map_or(false, f64::is_finite)
}
