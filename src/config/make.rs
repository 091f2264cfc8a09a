//! Parser for make-style `rules.mk` fragments.

use toml::{Table, Value};

use super::error::FragmentError;
use super::fragment::{logical_lines, FragmentParser};

/// Make directives that carry no settings of their own.
const DIRECTIVES: &[&str] = &[
    "include", "-include", "sinclude", "ifeq", "ifneq", "ifdef", "ifndef", "else", "endif",
    "export", "unexport", "override", "undefine", "vpath",
];

/// Parses `KEY = value` assignments out of a makefile fragment.
///
/// Supports `=`, `:=`, `?=` and `+=`. `?=` only sets a key not already assigned
/// in the same fragment, `+=` appends with a space. Values are kept as strings.
/// Comments, conditionals, includes, bare `$(...)` calls, rule lines with
/// their tab-indented recipes, and `define`/`endef` blocks are skipped.
/// Tab-indented assignments outside a recipe are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct RulesMkParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assign {
    Set,
    SetIfAbsent,
    Append,
}

impl FragmentParser for RulesMkParser {
    fn parse(&self, contents: &str) -> Result<Table, FragmentError> {
        let mut table = Table::new();
        let mut in_define = false;
        let mut in_recipe = false;

        for (line_no, line) in logical_lines(contents) {
            if line.starts_with('\t') {
                if in_recipe {
                    continue;
                }
            } else {
                in_recipe = false;
            }

            let line = strip_comment(&line).trim();
            if line.is_empty() {
                continue;
            }

            let first_word = line.split_whitespace().next().unwrap_or_default();
            if in_define {
                in_define = first_word != "endef";
                continue;
            }
            if first_word == "define" {
                in_define = true;
                continue;
            }
            if DIRECTIVES.contains(&first_word) || line.starts_with("$(") {
                continue;
            }

            let Some((key, op, value)) = split_assignment(line) else {
                if line.contains(':') {
                    // Rule line: `target: prerequisites`. Tab lines after it are its recipe.
                    in_recipe = true;
                    continue;
                }
                return Err(FragmentError::Syntax {
                    line: line_no,
                    message: format!("expected an assignment, found '{line}'"),
                });
            };

            if key.is_empty() || key.contains(char::is_whitespace) {
                return Err(FragmentError::Syntax {
                    line: line_no,
                    message: format!("invalid variable name '{key}'"),
                });
            }

            match op {
                Assign::Set => {
                    table.insert(key.to_string(), Value::String(value.to_string()));
                }
                Assign::SetIfAbsent => {
                    table
                        .entry(key.to_string())
                        .or_insert_with(|| Value::String(value.to_string()));
                }
                Assign::Append => {
                    let appended = match table.get(key).and_then(Value::as_str) {
                        Some(existing) if !existing.is_empty() => format!("{existing} {value}"),
                        _ => value.to_string(),
                    };
                    table.insert(key.to_string(), Value::String(appended));
                }
            }
        }

        Ok(table)
    }
}

/// Strips a `#` comment unless the `#` is escaped with a backslash.
fn strip_comment(line: &str) -> &str {
    let mut prev = None;
    for (idx, ch) in line.char_indices() {
        if ch == '#' && prev != Some('\\') {
            return &line[..idx];
        }
        prev = Some(ch);
    }
    line
}

fn split_assignment(line: &str) -> Option<(&str, Assign, &str)> {
    let eq = line.find('=')?;
    let (lhs, value) = (&line[..eq], line[eq + 1..].trim());

    let (key, op) = if let Some(key) = lhs.strip_suffix(':') {
        (key.strip_suffix(':').unwrap_or(key), Assign::Set)
    } else if let Some(key) = lhs.strip_suffix('?') {
        (key, Assign::SetIfAbsent)
    } else if let Some(key) = lhs.strip_suffix('+') {
        (key, Assign::Append)
    } else {
        (lhs, Assign::Set)
    };

    Some((key.trim(), op, value))
}
