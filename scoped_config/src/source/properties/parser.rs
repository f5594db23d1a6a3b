//! Parser for the `.properties` text format.
//!
//! Supports `#`/`!` comments, `=`, `:` or whitespace separators, backslash
//! line continuations, the `\t \n \r \f` escapes, `\uXXXX` escapes (UTF-16
//! surrogate pairs are combined) and identity escapes for any other
//! character.

use std::collections::HashMap;

use thiserror::Error;

use crate::RawEntry;

/// A malformed escape sequence in `.properties` text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct PropertiesSyntaxError {
    /// One-based line on which the offending logical line starts.
    pub line: usize,
    /// What was wrong.
    pub message: String,
}

const fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\x0c')
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|ch| *ch == '\\').count() & 1 == 1
}

/// Parse `.properties` text into raw entries in file order.
///
/// A key defined more than once keeps the position of its first definition
/// and the value of its last.
///
/// # Errors
///
/// Returns [`PropertiesSyntaxError`] when a `\u` escape is not followed by
/// four hexadecimal digits.
///
/// # Examples
///
/// ```
/// use scoped_config::parse_properties;
///
/// let entries = parse_properties("# comment\n(prod)db.url = jdbc:prod\n")?;
/// assert_eq!(entries[0].raw_key, "(prod)db.url");
/// assert_eq!(entries[0].value, "jdbc:prod");
/// # Ok::<_, scoped_config::PropertiesSyntaxError>(())
/// ```
pub fn parse_properties(text: &str) -> Result<Vec<RawEntry>, PropertiesSyntaxError> {
    let mut entries: Vec<RawEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut lines = text.lines().enumerate();
    while let Some((index, natural)) = lines.next() {
        let trimmed = natural.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
            continue;
        }
        let mut logical = trimmed.to_owned();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }
        let line = index + 1;
        let (key, value) = split_key_value(&logical);
        let key = unescape(key, line)?;
        let value = unescape(value, line)?;
        if let Some(&position) = positions.get(&key) {
            if let Some(existing) = entries.get_mut(position) {
                tracing::trace!(%key, line, "properties key redefined");
                existing.value = value;
            }
            continue;
        }
        positions.insert(key.clone(), entries.len());
        entries.push(RawEntry::new(key, value));
    }
    Ok(entries)
}

/// Split a logical line at the first unescaped separator.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = idx;
                break;
            }
            ch if is_blank(ch) => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }
    let (key, rest) = line.split_at(key_end);
    let rest = rest.trim_start_matches(is_blank);
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    (key, rest.trim_start_matches(is_blank))
}

fn unescape(text: &str, line: usize) -> Result<String, PropertiesSyntaxError> {
    let mut out = String::with_capacity(text.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            flush_units(&mut units, &mut out);
            out.push(ch);
            continue;
        }
        let Some(escape) = chars.next() else {
            break;
        };
        if escape == 'u' {
            let hex: String = chars.by_ref().take(4).collect();
            let unit = parse_unit(&hex).ok_or_else(|| PropertiesSyntaxError {
                line,
                message: format!("malformed \\uXXXX escape: \\u{hex}"),
            })?;
            units.push(unit);
            continue;
        }
        flush_units(&mut units, &mut out);
        out.push(match escape {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0c',
            other => other,
        });
    }
    flush_units(&mut units, &mut out);
    Ok(out)
}

fn parse_unit(hex: &str) -> Option<u16> {
    if hex.chars().count() != 4 {
        return None;
    }
    u16::from_str_radix(hex, 16).ok()
}

fn flush_units(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.push_str(&String::from_utf16_lossy(units));
    units.clear();
}
