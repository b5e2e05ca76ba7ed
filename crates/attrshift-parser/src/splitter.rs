//! Top-level comma splitting
//!
//! Both splitters scan character by character. Once a `'` or `"` run is open,
//! brackets and commas are ignored until the same quote character recurs.
//! A comma only separates segments outside any quote run and at nesting
//! depth zero.

use crate::error::{ParseError, Result};

/// Quote state shared by the scanners
#[derive(Debug, Default)]
struct QuoteState {
    open: Option<char>,
}

impl QuoteState {
    /// Feed one character, returns true while inside a quote run
    /// (including the delimiting quote characters themselves)
    fn feed(&mut self, c: char) -> bool {
        match self.open {
            None if c == '\'' || c == '"' => {
                self.open = Some(c);
                true
            }
            None => false,
            Some(q) => {
                if c == q {
                    self.open = None;
                }
                true
            }
        }
    }
}

/// Split on top-level commas with a single depth counter shared by `()` and `[]`.
///
/// Used for the operands of `'|'` / `'&'` groups. Empty segments are dropped.
pub fn split_top_level(input: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;
    let mut quotes = QuoteState::default();

    for c in input.chars() {
        if !quotes.feed(c) {
            match c {
                '(' | '[' => depth += 1,
                ')' | ']' => depth -= 1,
                ',' if depth == 0 => {
                    push_non_empty(&mut segments, &current);
                    current.clear();
                    continue;
                }
                _ => {}
            }
        }
        current.push(c);
    }

    push_non_empty(&mut segments, &current);
    segments
}

/// Split on top-level commas tracking parentheses and brackets independently.
///
/// Used for implicit-AND lists and for the elements of a triple. Interior
/// empty segments are kept so `('a', , 'b')` still counts three elements;
/// a trailing empty segment is dropped.
pub fn split_conditions(input: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut parens: i32 = 0;
    let mut brackets: i32 = 0;
    let mut quotes = QuoteState::default();

    for c in input.chars() {
        if !quotes.feed(c) {
            match c {
                '(' => parens += 1,
                ')' => parens -= 1,
                '[' => brackets += 1,
                ']' => brackets -= 1,
                ',' if parens == 0 && brackets == 0 => {
                    segments.push(current.trim().to_string());
                    current.clear();
                    continue;
                }
                _ => {}
            }
        }
        current.push(c);
    }

    push_non_empty(&mut segments, &current);
    segments
}

/// Byte offset of the first `target` outside quotes and brackets
pub fn find_top_level(input: &str, target: char) -> Option<usize> {
    let mut depth: i32 = 0;
    let mut quotes = QuoteState::default();

    for (i, c) in input.char_indices() {
        if quotes.feed(c) {
            continue;
        }
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ if c == target && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Check that every bracket closes in order and no quote run is left open
pub fn check_balanced(input: &str) -> Result<()> {
    let mut stack = Vec::new();
    let mut quotes = QuoteState::default();

    for c in input.chars() {
        if quotes.feed(c) {
            continue;
        }
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    return Err(ParseError::UnbalancedBrackets(input.to_string()));
                }
            }
            _ => {}
        }
    }

    if stack.is_empty() && quotes.open.is_none() {
        Ok(())
    } else {
        Err(ParseError::UnbalancedBrackets(input.to_string()))
    }
}

/// Remove one matching pair of surrounding quotes, if present
pub fn strip_quotes(token: &str) -> &str {
    let token = token.trim();
    let mut chars = token.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && (first == '\'' || first == '"') => {
            &token[1..token.len() - 1]
        }
        _ => token,
    }
}

/// Remove one leading `open` and one trailing `close`, each only if present
pub fn strip_enclosing(token: &str, open: char, close: char) -> &str {
    let token = token.trim();
    let token = token.strip_prefix(open).unwrap_or(token);
    let token = token.strip_suffix(close).unwrap_or(token);
    token.trim()
}

fn push_non_empty(segments: &mut Vec<String>, current: &str) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
}
