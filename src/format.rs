//! The flat `key=value` properties text format.
//!
//! Reading follows the conventional properties-file rules: `#` and `!`
//! comment lines, `=` or `:` separators, backslash line continuations and
//! the usual `\t \n \r \f \\ \uXXXX` escapes. Writing emits one
//! `key=value` line per entry in store order. Output stays UTF-8; no
//! `\uXXXX` transcoding of non-ASCII text and no timestamp header, so
//! serialization is deterministic and serialize-then-parse is identity.

use crate::store::Store;

pub(crate) fn parse(text: &str) -> Store {
    let mut store = Store::default();
    for line in logical_lines(text) {
        let (key, value) = split_pair(&line);
        if !key.is_empty() {
            store.set(&key, &value);
        }
    }
    store
}

pub(crate) fn serialize(store: &Store) -> String {
    let mut out = String::new();
    for (key, value) in store.entries() {
        out.push_str(&escape_key(key));
        out.push('=');
        out.push_str(&escape_value(value));
        out.push('\n');
    }
    out
}

/// Joins continuation lines and drops blanks and comments.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;
    for raw in text.lines() {
        let line = match pending.take() {
            Some(mut acc) => {
                acc.push_str(raw.trim_start());
                acc
            }
            None => {
                let trimmed = raw.trim_start();
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                trimmed.to_string()
            }
        };
        if ends_with_odd_backslashes(&line) {
            let mut acc = line;
            acc.pop();
            pending = Some(acc);
        } else {
            lines.push(line);
        }
    }
    if let Some(rest) = pending {
        lines.push(rest);
    }
    lines
}

fn ends_with_odd_backslashes(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Splits a logical line at the first unescaped `=` or `:`. A line with
/// no separator is a key with an empty value.
fn split_pair(line: &str) -> (String, String) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                let key = trim_unescaped_end(&line[..i]);
                let value = line[i + c.len_utf8()..].trim_start();
                return (unescape(key), unescape(value));
            }
            _ => {}
        }
    }
    (unescape(trim_unescaped_end(line)), String::new())
}

/// Trims trailing blanks, keeping a backslash-escaped trailing blank.
fn trim_unescaped_end(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = s.len();
    while end > 0 && (bytes[end - 1] == b' ' || bytes[end - 1] == b'\t') {
        let backslashes = bytes[..end - 1]
            .iter()
            .rev()
            .take_while(|&&b| b == b'\\')
            .count();
        if backslashes % 2 == 1 {
            break;
        }
        end -= 1;
    }
    &s[..end]
}

fn unescape(raw: &str) -> String {
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
            Some('f') => out.push('\u{000c}'),
            Some('u') => {
                let code: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&code, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        // malformed unicode escape, keep the raw text
                        out.push('u');
                        out.push_str(&code);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn escape_common(c: char, out: &mut String) -> bool {
    match c {
        '\\' => out.push_str("\\\\"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\u{000c}' => out.push_str("\\f"),
        '=' | ':' | '#' | '!' => {
            out.push('\\');
            out.push(c);
        }
        _ => return false,
    }
    true
}

fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        if escape_common(c, &mut out) {
            continue;
        }
        if c == ' ' {
            out.push_str("\\ ");
        } else {
            out.push(c);
        }
    }
    out
}

fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut leading = true;
    for c in value.chars() {
        if c != ' ' {
            leading = false;
        }
        if escape_common(c, &mut out) {
            continue;
        }
        if c == ' ' && leading {
            // only leading spaces need protection from the parser's trim
            out.push_str("\\ ");
        } else {
            out.push(c);
        }
    }
    out
}
