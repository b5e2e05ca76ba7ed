//! Legacy `attrs` dictionary parser
//!
//! Reads the Python-style dictionary of an `attrs` attribute, e.g.
//! `{'invisible': [('state', '=', 'done')], 'required': [('type', '=', 'x')]}`,
//! and converts each domain into its own inline-expression attribute.

use crate::condition_parser::ConditionParser;
use crate::error::{ParseError, Result};
use crate::splitter::{check_balanced, find_top_level, split_top_level, strip_quotes};

/// One `'key': [domain]` entry of an attrs dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrsEntry {
    pub key: String,
    /// Domain list exactly as written
    pub domain: String,
}

/// Parser for attrs dictionaries
pub struct AttrsParser;

impl AttrsParser {
    /// Split a `{...}` dictionary into its entries, in source order
    pub fn entries(dict: &str) -> Result<Vec<AttrsEntry>> {
        let dict = dict.trim();
        check_balanced(dict)?;

        let inner = dict
            .strip_prefix('{')
            .and_then(|d| d.strip_suffix('}'))
            .ok_or_else(|| ParseError::InvalidAttrs(format!("not a dictionary: {}", dict)))?;

        let mut entries = Vec::new();
        for item in split_top_level(inner) {
            let colon = find_top_level(&item, ':')
                .ok_or_else(|| ParseError::InvalidAttrs(format!("missing ':' in {}", item)))?;

            let key = strip_quotes(&item[..colon]).to_string();
            let domain = item[colon + 1..].trim().to_string();

            if key.is_empty() {
                return Err(ParseError::InvalidAttrs(format!("empty key in {}", item)));
            }
            if !domain.starts_with('[') {
                return Err(ParseError::InvalidAttrs(format!(
                    "value of '{}' is not a domain list",
                    key
                )));
            }
            entries.push(AttrsEntry { key, domain });
        }
        Ok(entries)
    }

    /// Convert the domains of `keys`, in the order of `keys`.
    ///
    /// A dictionary holding a key outside `keys` is rejected rather than
    /// having that key dropped from the output.
    pub fn convert(dict: &str, keys: &[String]) -> Result<Vec<(String, String)>> {
        let entries = Self::entries(dict)?;

        if let Some(unknown) = entries.iter().find(|e| !keys.contains(&e.key)) {
            return Err(ParseError::InvalidAttrs(format!(
                "unsupported key '{}'",
                unknown.key
            )));
        }

        let mut converted = Vec::new();
        for key in keys {
            // Later duplicates win, as in a Python dict literal
            if let Some(entry) = entries.iter().rev().find(|e| &e.key == key) {
                let node = ConditionParser::parse(&entry.domain)?;
                converted.push((key.clone(), node.render()));
            }
        }
        Ok(converted)
    }

    /// Join converted pairs as `key="expression"` attributes
    pub fn to_attributes(pairs: &[(String, String)]) -> String {
        pairs
            .iter()
            .map(|(key, expr)| format!("{}=\"{}\"", key, expr))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_keys() -> Vec<String> {
        ["invisible", "readonly", "required"]
            .iter()
            .map(|k| k.to_string())
            .collect()
    }

    #[test]
    fn test_entries_in_source_order() {
        let entries = AttrsParser::entries(
            "{'required': [('a','=',1)], 'invisible': [('b','in',['x','y'])]}",
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "required");
        assert_eq!(entries[1].domain, "[('b','in',['x','y'])]");
    }

    #[test]
    fn test_convert_follows_key_order() {
        let pairs = AttrsParser::convert(
            "{'required': [('meeting_type', '=', 'physical')], 'invisible': [('meeting_type', '=', 'online')]}",
            &default_keys(),
        )
        .unwrap();

        assert_eq!(
            AttrsParser::to_attributes(&pairs),
            "invisible=\"meeting_type == 'online'\" required=\"meeting_type == 'physical'\""
        );
    }

    #[test]
    fn test_unsupported_key_rejected() {
        let result = AttrsParser::convert("{'column_invisible': [('a','=',1)]}", &default_keys());
        assert!(matches!(result, Err(ParseError::InvalidAttrs(_))));
    }

    #[test]
    fn test_non_list_value_rejected() {
        assert!(AttrsParser::entries("{'invisible': True}").is_err());
        assert!(AttrsParser::entries("'invisible': [('a','=',1)]").is_err());
    }

    #[test]
    fn test_bad_domain_propagates() {
        let result = AttrsParser::convert("{'invisible': [('a','=')]}", &default_keys());
        assert!(matches!(result, Err(ParseError::MalformedTriple(_))));
    }

    #[test]
    fn test_empty_dictionary() {
        assert!(AttrsParser::convert("{}", &default_keys()).unwrap().is_empty());
    }
}
