//! Exporting resolved properties to other configuration consumers.

use std::collections::BTreeMap;

use figment::{
    Metadata, Profile, Provider,
    util::nest,
    value::{Dict, Map, Value},
};

/// Flat snapshot of resolved properties usable as a [`figment::Provider`].
///
/// Dotted keys are nested, so `db.port=5432` becomes a `db` table holding
/// `port`. Values are parsed the way figment parses environment variables:
/// `5432` becomes a number and `true` a boolean, anything else stays a string.
/// A key that is both a value and a prefix of other keys, such as `db`
/// alongside `db.port`, cannot be nested and makes [`Provider::data`] fail.
///
/// # Examples
///
/// ```
/// use figment::Figment;
/// use scoped_config::PropertySnapshot;
///
/// #[derive(serde::Deserialize)]
/// struct Db {
///     port: u16,
/// }
/// #[derive(serde::Deserialize)]
/// struct App {
///     db: Db,
/// }
///
/// let snapshot = PropertySnapshot::new([("db.port".to_owned(), "5432".to_owned())].into());
/// let app: App = Figment::from(snapshot).extract()?;
/// assert_eq!(app.db.port, 5432);
/// # Ok::<_, figment::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct PropertySnapshot {
    properties: BTreeMap<String, String>,
    profile: Profile,
}

impl PropertySnapshot {
    /// Snapshot of `properties` emitted under the default profile.
    #[must_use]
    pub fn new(properties: BTreeMap<String, String>) -> Self {
        Self {
            properties,
            profile: Profile::Default,
        }
    }

    /// Emit the data under `profile` instead.
    #[must_use]
    pub fn profile(mut self, profile: impl Into<Profile>) -> Self {
        self.profile = profile.into();
        self
    }

    /// The flat properties.
    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Consume the snapshot, returning the flat properties.
    #[must_use]
    pub fn into_properties(self) -> BTreeMap<String, String> {
        self.properties
    }
}

impl Provider for PropertySnapshot {
    fn metadata(&self) -> Metadata {
        Metadata::named("resolved scoped properties")
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.profile.clone())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let mut dict = Dict::new();
        for (key, raw) in &self.properties {
            let value = raw
                .parse::<Value>()
                .unwrap_or_else(|_| Value::from(raw.clone()));
            if let Some(nested) = nest(key, value).into_dict() {
                merge_into(&mut dict, nested, "")?;
            }
        }
        Ok(self.profile.collect(dict))
    }
}

fn merge_into(target: &mut Dict, incoming: Dict, prefix: &str) -> Result<(), figment::Error> {
    for (key, value) in incoming {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match target.get_mut(&key) {
            None => {
                target.insert(key, value);
            }
            Some(Value::Dict(_, existing)) => match value {
                Value::Dict(_, nested) => merge_into(existing, nested, &path)?,
                _ => return Err(value_and_table(&path)),
            },
            Some(_) => return Err(value_and_table(&path)),
        }
    }
    Ok(())
}

fn value_and_table(path: &str) -> figment::Error {
    tracing::warn!(key = path, "property is both a value and a table");
    figment::Error::from(format!(
        "property '{path}' has a value and also prefixes other properties"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, ensure};
    use figment::Figment;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pool {
        size: u32,
        enabled: bool,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Db {
        url: String,
        pool: Pool,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct App {
        name: String,
        db: Db,
    }

    #[rstest]
    fn nests_dotted_keys() -> Result<()> {
        let snapshot = PropertySnapshot::new(BTreeMap::from([
            ("name".to_owned(), "svc".to_owned()),
            ("db.url".to_owned(), "jdbc:db".to_owned()),
            ("db.pool.size".to_owned(), "4".to_owned()),
            ("db.pool.enabled".to_owned(), "true".to_owned()),
        ]));
        let app: App = Figment::from(snapshot).extract()?;
        ensure!(app.name == "svc");
        ensure!(app.db.url == "jdbc:db");
        ensure!(app.db.pool == Pool { size: 4, enabled: true });
        Ok(())
    }

    #[rstest]
    #[case::value_first(&[("db", "x"), ("db.port", "5432")], "db")]
    #[case::nested(&[("db.pool", "x"), ("db.pool.size", "4"), ("db.url", "u")], "db.pool")]
    fn rejects_key_that_is_also_a_table(#[case] pairs: &[(&str, &str)], #[case] path: &str) {
        let snapshot = PropertySnapshot::new(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        );
        let err = snapshot.data().expect_err("conflicting keys should fail");
        assert!(err.to_string().contains(&format!("'{path}'")), "{err}");
    }

    #[rstest]
    fn emits_under_selected_profile() -> Result<()> {
        let snapshot = PropertySnapshot::new(BTreeMap::from([(
            "name".to_owned(),
            "svc".to_owned(),
        )]))
        .profile("staging");
        let data = snapshot.data()?;
        ensure!(data.contains_key(&Profile::new("staging")));
        ensure!(snapshot.into_properties().len() == 1);
        Ok(())
    }
}
