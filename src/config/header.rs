//! Parser for C header `config.h` fragments.

use toml::{Table, Value};
use tracing::trace;

use super::error::FragmentError;
use super::fragment::{coerce_value, logical_lines, FragmentParser};

/// Collects object-like `#define NAME [value]` macros from a C header.
///
/// A define without a value is recorded as `true`. `#undef NAME` removes an
/// earlier define from the same fragment. Function-like macros and all other
/// preprocessor directives are ignored. Comments are stripped first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigHeaderParser;

impl FragmentParser for ConfigHeaderParser {
    fn parse(&self, contents: &str) -> Result<Table, FragmentError> {
        let mut table = Table::new();
        let mut in_comment = false;

        for (line_no, line) in logical_lines(contents) {
            let code = strip_comments(&line, &mut in_comment);
            let Some(directive) = code.trim().strip_prefix('#') else {
                continue;
            };

            let directive = directive.trim_start();
            let (keyword, rest) = directive
                .split_once(char::is_whitespace)
                .unwrap_or((directive, ""));
            let rest = rest.trim();

            match keyword {
                "define" => {
                    let (name, value) = rest
                        .split_once(char::is_whitespace)
                        .unwrap_or((rest, ""));
                    if name.is_empty() {
                        return Err(missing_name(line_no, keyword));
                    }
                    if name.contains('(') {
                        trace!(line = line_no, macro_name = name, "skipping function-like macro");
                        continue;
                    }

                    let value = value.trim();
                    let value = if value.is_empty() {
                        Value::Boolean(true)
                    } else {
                        coerce_value(value)
                    };
                    table.insert(name.to_string(), value);
                }
                "undef" => {
                    if rest.is_empty() {
                        return Err(missing_name(line_no, keyword));
                    }
                    table.remove(rest);
                }
                _ => {}
            }
        }

        Ok(table)
    }
}

fn missing_name(line: usize, keyword: &str) -> FragmentError {
    FragmentError::Syntax {
        line,
        message: format!("#{keyword} without a macro name"),
    }
}

/// Removes `//` and `/* */` comments, carrying an open block comment across lines.
/// Comment markers inside `"..."` literals are kept.
fn strip_comments(line: &str, in_comment: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut in_string = false;

    while let Some(ch) = chars.next() {
        if *in_comment {
            if ch == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_comment = false;
                out.push(' ');
            }
            continue;
        }

        if in_string {
            out.push(ch);
            match ch {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (ch, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => return out,
            ('/', Some('*')) => {
                chars.next();
                *in_comment = true;
            }
            _ => out.push(ch),
        }
    }

    out
}
