//! Markup helpers: structural validation, formatting and cleanup
//!
//! View definitions are usually fragments (several top-level elements), so
//! validation checks tag balance and attribute syntax without requiring a
//! single document root.

use attrshift_core::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static ATTRS_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\battrs\s*=\s*"([^"]*)""#).expect("valid attrs value regex"));
static CLOSING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^</\w").expect("valid closing line regex"));
static OPENING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<\w[^>]*[^/]>$").expect("valid opening line regex"));

/// Best-effort structural check of a markup text.
///
/// Returns at most one syntax finding (the first one met) plus the nested
/// quote warning for `attrs` values.
pub fn validate_markup(text: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Err(message) = check_well_formed(text) {
        errors.push(ValidationError::new(format!(
            "Invalid XML syntax detected: {}",
            message
        )));
    }

    if has_nested_attrs_quotes(text) {
        errors.push(ValidationError::new(
            "Potential nested quotes issue in attrs attribute",
        ));
    }

    errors
}

/// An `attrs` dictionary cut short by a double quote inside it
fn has_nested_attrs_quotes(text: &str) -> bool {
    ATTRS_VALUE.captures_iter(text).any(|caps| {
        let value = caps[1].trim();
        value.starts_with('{') && !value.ends_with('}')
    })
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

fn check_well_formed(text: &str) -> Result<(), String> {
    let mut stack: Vec<(String, usize)> = Vec::new();
    let mut pos = 0;

    while let Some(rel) = text[pos..].find('<') {
        let start = pos + rel;
        let tail = &text[start..];
        let line = line_of(text, start);

        let skip_until = |terminator: &str, what: &str| -> Result<usize, String> {
            tail.find(terminator)
                .map(|end| start + end + terminator.len())
                .ok_or_else(|| format!("unterminated {} at line {}", what, line))
        };

        if tail.starts_with("<!--") {
            pos = skip_until("-->", "comment")?;
            continue;
        }
        if tail.starts_with("<![CDATA[") {
            pos = skip_until("]]>", "CDATA section")?;
            continue;
        }
        if tail.starts_with("<?") {
            pos = skip_until("?>", "processing instruction")?;
            continue;
        }
        if tail.starts_with("<!") {
            pos = skip_until(">", "declaration")?;
            continue;
        }

        let end = tag_end(tail).map_err(|e| format!("{} at line {}", e, line))?;
        let body = &tail[1..end];
        pos = start + end + 1;

        if let Some(closing) = body.strip_prefix('/') {
            let name = closing.trim();
            match stack.pop() {
                Some((open, _)) if open == name => {}
                Some((open, open_line)) => {
                    return Err(format!(
                        "</{}> at line {} does not close <{}> opened at line {}",
                        name, line, open, open_line
                    ))
                }
                None => return Err(format!("unexpected </{}> at line {}", name, line)),
            }
            continue;
        }

        let self_closing = body.ends_with('/');
        let body = body.strip_suffix('/').unwrap_or(body);
        let name_end = body
            .find(|c: char| c.is_whitespace())
            .unwrap_or(body.len());
        let name = &body[..name_end];

        let valid_name = name
            .chars()
            .next()
            .map_or(false, |c| c.is_alphabetic() || c == '_' || c == ':');
        if !valid_name {
            return Err(format!("invalid tag name {:?} at line {}", name, line));
        }

        check_attributes(&body[name_end..]).map_err(|e| format!("{} on <{}> at line {}", e, name, line))?;

        if !self_closing {
            stack.push((name.to_string(), line));
        }
    }

    match stack.pop() {
        Some((open, open_line)) => Err(format!("<{}> opened at line {} is never closed", open, open_line)),
        None => Ok(()),
    }
}

/// Offset of the `>` closing the tag that starts `tail`, skipping quoted values
fn tag_end(tail: &str) -> Result<usize, String> {
    let mut quote: Option<char> = None;
    for (i, c) in tail.char_indices().skip(1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '>' => return Ok(i),
                '<' => return Err("unexpected '<' inside tag".to_string()),
                _ => {}
            },
        }
    }
    Err("unterminated tag".to_string())
}

fn check_attributes(attrs: &str) -> Result<(), String> {
    let mut seen = HashSet::new();
    let mut rest = attrs.trim_start();

    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        if name.is_empty() {
            return Err("attribute without a name".to_string());
        }

        rest = rest[name_end..].trim_start();
        rest = rest
            .strip_prefix('=')
            .ok_or_else(|| format!("attribute '{}' has no value", name))?
            .trim_start();

        let quote = rest
            .chars()
            .next()
            .filter(|c| *c == '"' || *c == '\'')
            .ok_or_else(|| format!("value of attribute '{}' is not quoted", name))?;
        let close = rest[1..]
            .find(quote)
            .ok_or_else(|| format!("value of attribute '{}' is not terminated", name))?;

        if !seen.insert(name) {
            return Err(format!("duplicate attribute '{}'", name));
        }
        rest = rest[close + 2..].trim_start();
    }
    Ok(())
}

/// Remove every occurrence of each deprecated widget marker
pub fn cleanup_deprecated_widgets(text: &str, widgets: &[String]) -> String {
    widgets
        .iter()
        .fold(text.to_string(), |acc, widget| acc.replace(widget.as_str(), ""))
}

/// Put each tag on its own line, indented two spaces per open element
pub fn format_markup(text: &str) -> String {
    let split = text.replace("><", ">\n<");
    let mut indent: usize = 0;
    let mut out = String::with_capacity(split.len());

    for line in split.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if CLOSING_LINE.is_match(line) {
            indent = indent.saturating_sub(1);
        }
        out.push_str(&"  ".repeat(indent));
        out.push_str(line);
        out.push('\n');
        if OPENING_LINE.is_match(line) {
            indent += 1;
        }
    }
    out
}

/// Decode the predefined XML entities of an attribute value
pub fn unescape_attr(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Escape a string for use inside a double-quoted attribute value
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}
