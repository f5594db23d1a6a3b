//! Structured configuration flattened to dotted keys through figment.

use camino::Utf8PathBuf;
use figment::{
    Figment, Provider,
    providers::{Format, Toml},
};
use serde_json::Value;

use crate::{KeyValueSource, RawEntry, ScopedError, ScopedResult};

use super::helpers;

#[derive(Debug)]
enum Input {
    Figment(Figment),
    TomlFile(Utf8PathBuf),
}

/// Source that extracts any figment provider and flattens nested tables.
///
/// Nested tables become dotted keys (`[db] url = "x"` yields `db.url`).
/// Scalars are rendered as text, arrays of scalars are joined with `,`,
/// other arrays are rendered as JSON and `null` values are skipped. A table
/// name may itself carry a scope annotation, so `["(prod)db"]` with
/// `url = "x"` yields the raw key `(prod)db.url`.
///
/// # Examples
///
/// ```
/// use figment::providers::{Format, Toml};
/// use scoped_config::{FigmentSource, KeyValueSource};
///
/// let source = FigmentSource::new("inline", Toml::string("[db]\nport = 5432"));
/// let entries = source.entries()?;
/// assert_eq!(entries[0].raw_key, "db.port");
/// assert_eq!(entries[0].value, "5432");
/// # Ok::<_, scoped_config::ScopedError>(())
/// ```
#[derive(Debug)]
pub struct FigmentSource {
    name: String,
    input: Input,
}

impl FigmentSource {
    /// Wrap a single provider.
    #[must_use]
    pub fn new(name: impl Into<String>, provider: impl Provider) -> Self {
        Self::from_figment(name, Figment::from(provider))
    }

    /// Wrap an already composed figment.
    #[must_use]
    pub fn from_figment(name: impl Into<String>, figment: Figment) -> Self {
        Self {
            name: name.into(),
            input: Input::Figment(figment),
        }
    }

    /// Read a TOML file at `path` each time entries are requested.
    #[must_use]
    pub fn toml_file(path: impl Into<Utf8PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.to_string(),
            input: Input::TomlFile(path),
        }
    }

    fn extract(&self) -> ScopedResult<Value> {
        let result = match &self.input {
            Input::Figment(figment) => figment.extract::<Value>(),
            Input::TomlFile(path) => {
                let text = helpers::read_to_string(path)
                    .map_err(|err| ScopedError::source_load(&self.name, err))?;
                Figment::from(Toml::string(&text)).extract::<Value>()
            }
        };
        result.map_err(|err| ScopedError::source_load(&self.name, err))
    }
}

impl KeyValueSource for FigmentSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> ScopedResult<Vec<RawEntry>> {
        let mut entries = Vec::new();
        if let Value::Object(map) = self.extract()? {
            for (key, value) in map {
                flatten(key, value, &mut entries);
            }
        }
        Ok(entries)
    }
}

fn flatten(key: String, value: Value, out: &mut Vec<RawEntry>) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (child, nested) in map {
                flatten(format!("{key}.{child}"), nested, out);
            }
        }
        Value::Array(items) if items.iter().all(is_scalar) => {
            let joined = items.iter().filter_map(render_scalar).collect::<Vec<_>>();
            out.push(RawEntry::new(key, joined.join(",")));
        }
        Value::Array(_) => out.push(RawEntry::new(key, value.to_string())),
        scalar => {
            if let Some(text) = render_scalar(&scalar) {
                out.push(RawEntry::new(key, text));
            }
        }
    }
}

const fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, ensure};
    use figment::providers::Serialized;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn as_map(source: &FigmentSource) -> Result<BTreeMap<String, String>> {
        Ok(source
            .entries()?
            .into_iter()
            .map(|entry| (entry.raw_key, entry.value))
            .collect())
    }

    #[rstest]
    fn flattens_nested_tables() -> Result<()> {
        let toml = r#"
            name = "svc"
            [db]
            port = 5432
            [db.pool]
            size = 4
            enabled = true
            ["(prod)db"]
            port = 6432
        "#;
        let map = as_map(&FigmentSource::new("inline", Toml::string(toml)))?;
        ensure!(map.get("name").map(String::as_str) == Some("svc"));
        ensure!(map.get("db.port").map(String::as_str) == Some("5432"));
        ensure!(map.get("db.pool.size").map(String::as_str) == Some("4"));
        ensure!(map.get("db.pool.enabled").map(String::as_str) == Some("true"));
        ensure!(map.get("(prod)db.port").map(String::as_str) == Some("6432"));
        Ok(())
    }

    #[rstest]
    fn renders_arrays() -> Result<()> {
        let toml = "hosts = [\"a\", \"b\"]\nports = [1, 2]\nmixed = [[1], [2]]\n";
        let map = as_map(&FigmentSource::new("inline", Toml::string(toml)))?;
        ensure!(map.get("hosts").map(String::as_str) == Some("a,b"));
        ensure!(map.get("ports").map(String::as_str) == Some("1,2"));
        ensure!(map.get("mixed").map(String::as_str) == Some("[[1],[2]]"));
        Ok(())
    }

    #[rstest]
    fn accepts_serialized_providers() -> Result<()> {
        let defaults = BTreeMap::from([("(default)timeout", 30)]);
        let map = as_map(&FigmentSource::new(
            "defaults",
            Serialized::defaults(defaults),
        ))?;
        ensure!(map.get("(default)timeout").map(String::as_str) == Some("30"));
        Ok(())
    }

    #[rstest]
    fn invalid_toml_is_a_source_error() {
        let source = FigmentSource::new("broken", Toml::string("name = "));
        let err = source.entries().expect_err("invalid TOML should fail");
        assert!(
            matches!(err, ScopedError::SourceLoad { ref source_name, .. } if source_name == "broken"),
            "unexpected error: {err:?}"
        );
    }

    #[rstest]
    fn missing_toml_file_is_a_source_error() {
        let source = FigmentSource::toml_file("no/such/file.toml");
        assert!(matches!(
            source.entries(),
            Err(ScopedError::SourceLoad { .. })
        ));
    }
}
