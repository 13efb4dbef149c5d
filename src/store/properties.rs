//! Flat `key=value` properties format
//!
//! Reads the line-oriented properties syntax used by the state file,
//! including comments, continuation lines and backslash escapes, and writes
//! it back in a form that reads to the same mapping.

use crate::store::traits::{StoreError, StoreResult};
use std::collections::BTreeMap;

const WHITESPACE: &[char] = &[' ', '\t', '\u{c}'];
const SEPARATORS: &[char] = &['=', ':'];

/// An in-memory flat string-to-string mapping
///
/// Keys are kept sorted so that persisted files are stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses properties text
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Malformed`] for an invalid `\uXXXX` escape.
    /// Everything else is accepted.
    pub fn parse(text: &str) -> StoreResult<Self> {
        let mut entries = BTreeMap::new();

        for (line_no, logical) in logical_lines(text) {
            let (key, value) = split_entry(&logical);
            let key = unescape(key).map_err(|message| StoreError::Malformed {
                line: line_no,
                message,
            })?;
            let value = unescape(value).map_err(|message| StoreError::Malformed {
                line: line_no,
                message,
            })?;
            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    /// Renders the mapping, preceded by one comment line per header entry
    pub fn to_text(&self, header: &[String]) -> String {
        let mut out = String::new();

        for comment in header {
            out.push('#');
            out.push_str(comment);
            out.push('\n');
        }

        for (key, value) in &self.entries {
            out.push_str(&escape(key, true));
            out.push('=');
            out.push_str(&escape(value, false));
            out.push('\n');
        }

        out
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Sets a value, returning the previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Joins continuation lines and drops blanks and comments
///
/// Yields the 1-based number of the first physical line of each entry.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut result = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_start_matches(WHITESPACE);

        match current.as_mut() {
            Some((_, buf)) => buf.push_str(line),
            None => {
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    continue;
                }
                current = Some((idx + 1, line.to_string()));
            }
        }

        let continues = current
            .as_ref()
            .is_some_and(|(_, buf)| trailing_backslashes(buf) % 2 == 1);

        if continues {
            if let Some((_, buf)) = current.as_mut() {
                buf.pop();
            }
        } else if let Some(done) = current.take() {
            result.push(done);
        }
    }

    // A continuation on the last line ends the entry
    if let Some(done) = current.take() {
        result.push(done);
    }

    result
}

fn trailing_backslashes(s: &str) -> usize {
    s.chars().rev().take_while(|&c| c == '\\').count()
}

/// Splits a logical line into its raw (still escaped) key and value
fn split_entry(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(WHITESPACE);
    if let Some(stripped) = rest.strip_prefix(SEPARATORS) {
        rest = stripped.trim_start_matches(WHITESPACE);
    }

    (key, rest)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&digits, 16)
                    .ok()
                    .filter(|_| digits.len() == 4)
                    .ok_or_else(|| format!("invalid \\u escape: \\u{}", digits))?;
                let ch = char::from_u32(code)
                    .ok_or_else(|| format!("invalid code point: \\u{}", digits))?;
                out.push(ch);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn escape(s: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(s.len());

    for (i, c) in s.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }

    out
}
