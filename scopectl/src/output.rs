//! Rendering and writing resolved properties.

use std::collections::BTreeMap;
use std::io::Write as _;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use scoped_config::{Configuration, ResolvedConfiguration, ResolvedEntry, ScopedError};

use crate::cli::OutputFormat;
use crate::error::ScopectlError;

/// Render every resolved property, ordered by logical key.
///
/// # Errors
///
/// Returns [`ScopectlError`] if the configuration was destroyed or JSON
/// rendering fails.
pub fn render(
    config: &ResolvedConfiguration,
    format: OutputFormat,
) -> Result<String, ScopectlError> {
    let mut entries = Vec::new();
    for key in config.keys()? {
        if let Some(entry) = config.entry(key)? {
            entries.push(entry);
        }
    }
    render_entries(&entries, format)
}

/// Render the single property `key`.
///
/// # Errors
///
/// Returns [`ScopectlError::Resolve`] with [`ScopedError::MissingKey`] when
/// the key has no value.
pub fn render_key(
    config: &ResolvedConfiguration,
    key: &str,
    format: OutputFormat,
) -> Result<String, ScopectlError> {
    let entry = config
        .entry(key)?
        .ok_or_else(|| ScopedError::missing_key(key, "string"))?;
    if format == OutputFormat::Text {
        return Ok(format!("{}\n", entry.value()));
    }
    render_entries(&[entry], format)
}

fn render_entries(entries: &[&ResolvedEntry], format: OutputFormat) -> Result<String, ScopectlError> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => {
            for entry in entries {
                out.push_str(&entry.to_string());
                out.push('\n');
            }
        }
        OutputFormat::Properties => {
            for entry in entries {
                out.push_str(&escape(entry.logical_key(), true));
                out.push('=');
                out.push_str(&escape(entry.value(), false));
                out.push('\n');
            }
        }
        OutputFormat::Json => {
            let map: BTreeMap<&str, &str> = entries
                .iter()
                .map(|entry| (entry.logical_key(), entry.value()))
                .collect();
            out = serde_json::to_string_pretty(&map)?;
            out.push('\n');
        }
    }
    Ok(out)
}

/// Escape `text` for a `.properties` file; keys also escape separators.
fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, ch) in text.chars().enumerate() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(ch);
            }
            ' ' if is_key || idx == 0 => out.push_str("\\ "),
            _ => out.push(ch),
        }
    }
    out
}

/// Write `content` to `path` through a capability handle on its parent.
///
/// # Errors
///
/// Returns [`ScopectlError::Io`] if the directory cannot be opened or the
/// file cannot be written.
pub fn write_output(path: &Utf8Path, content: &str) -> Result<(), ScopectlError> {
    let io_err = |source: std::io::Error| ScopectlError::Io {
        path: path.to_path_buf(),
        source,
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        io_err(std::io::Error::other("output path has no file name"))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_err)?;
    let mut file = dir.create(file_name).map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface rendering mistakes"
)]
mod tests {
    use super::*;
    use rstest::rstest;
    use scoped_config::{MapSource, ResolutionContext};

    fn resolved(pairs: &[(&str, &str)]) -> ResolvedConfiguration {
        let context = ResolutionContext::builder()
            .source(MapSource::new("inline", pairs.iter().copied()))
            .scope("p")
            .fallback_to_default()
            .build()
            .expect("context should build");
        ResolvedConfiguration::load(&context).expect("configuration should resolve")
    }

    #[rstest]
    fn text_shows_winning_scope() {
        let config = resolved(&[("(default)b", "2"), ("(p)a", "1")]);
        let text = render(&config, OutputFormat::Text).expect("render");
        assert_eq!(text, "p: a=1\ndefault: b=2\n");
    }

    #[rstest]
    fn properties_escape_special_characters() {
        let config = resolved(&[("(p)a:b", " lead\ttab"), ("(p)path", "c:\\dir")]);
        let text = render(&config, OutputFormat::Properties).expect("render");
        assert_eq!(text, "a\\:b=\\ lead\\ttab\npath=c:\\\\dir\n");
    }

    #[rstest]
    fn properties_output_parses_back() {
        let config = resolved(&[("(p)key with space", "v=1"), ("(p)u", "été")]);
        let text = render(&config, OutputFormat::Properties).expect("render");
        let parsed = scoped_config::parse_properties(&text).expect("parse back");
        let pairs: Vec<_> = parsed
            .iter()
            .map(|e| (e.raw_key.as_str(), e.value.as_str()))
            .collect();
        assert_eq!(pairs, [("key with space", "v=1"), ("u", "été")]);
    }

    #[rstest]
    fn json_maps_keys_to_values() {
        let config = resolved(&[("(p)a", "1"), ("(default)b", "x")]);
        let json = render(&config, OutputFormat::Json).expect("render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value, serde_json::json!({"a": "1", "b": "x"}));
    }

    #[rstest]
    fn single_key_text_is_the_bare_value() {
        let config = resolved(&[("(p)a", "1")]);
        assert_eq!(render_key(&config, "a", OutputFormat::Text).expect("render"), "1\n");
        assert!(matches!(
            render_key(&config, "missing", OutputFormat::Text),
            Err(ScopectlError::Resolve(ScopedError::MissingKey { .. }))
        ));
    }
}
