//! Configuration fragments: one file's worth of settings at one level of the tree.

use toml::{Table, Value};

use super::error::FragmentError;

/// Turns the raw contents of a fragment file into a flat settings table.
pub trait FragmentParser: Send + Sync + std::fmt::Debug {
    fn parse(&self, contents: &str) -> Result<Table, FragmentError>;
}

/// Parses fragments written as TOML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlParser;

impl FragmentParser for TomlParser {
    fn parse(&self, contents: &str) -> Result<Table, FragmentError> {
        Ok(toml::from_str(contents)?)
    }
}

/// Merges `overlay` into `base`. Keys in the overlay replace existing keys
/// wholesale; nested tables are not merged.
pub fn merge_overwrite(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        base.insert(key, value);
    }
}

/// Coerces a raw setting value to the most specific type:
/// boolean, integer (decimal or `0x` hex), float, or string (fallback).
///
/// A value wrapped in double quotes is always a string, with the quotes removed.
pub fn coerce_value(s: &str) -> Value {
    if let Some(inner) = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return Value::String(inner.to_string());
    }

    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    if looks_like_integer(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
    }

    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if let Ok(i) = i64::from_str_radix(hex, 16) {
            return Value::Integer(i);
        }
    }

    if s.contains('.') {
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::String(s.to_string())
}

fn looks_like_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Joins lines ending in `\` with the following line.
///
/// Yields `(line_number, logical_line)`, where the line number is 1-based and
/// points at the first physical line of the logical line.
pub(crate) fn logical_lines(contents: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in contents.lines().enumerate() {
        let (start, mut buf) = pending.take().unwrap_or((idx + 1, String::new()));
        match raw.strip_suffix('\\') {
            Some(head) => {
                buf.push_str(head);
                buf.push(' ');
                pending = Some((start, buf));
            }
            None => {
                buf.push_str(raw);
                lines.push((start, buf));
            }
        }
    }

    if let Some(last) = pending {
        lines.push(last);
    }

    lines
}
