//! Environment variables as a property source.

use figment::providers::Env;

use crate::{KeyValueSource, RawEntry, ScopedResult};

/// Source reading environment variables through [`figment::providers::Env`].
///
/// Keys are lower-cased and stripped of the prefix. With
/// [`split`](Self::split), a separator such as `__` maps to `.` so
/// `APP_DB__URL` becomes `db.url`. An optional [`scope`](Self::scope) is
/// prepended to every key in `(scope)key` form, letting the environment act
/// as one more scope in the lookup order.
#[derive(Clone, Debug)]
pub struct EnvSource {
    name: String,
    prefix: String,
    separator: Option<String>,
    scope: Option<String>,
}

impl EnvSource {
    /// Read variables starting with `prefix`.
    #[must_use]
    pub fn prefixed(prefix: &str) -> Self {
        Self {
            name: format!("environment ({prefix}*)"),
            prefix: prefix.to_owned(),
            separator: None,
            scope: None,
        }
    }

    /// Map `separator` in variable names to `.`.
    #[must_use]
    pub fn split(mut self, separator: &str) -> Self {
        self.separator = Some(separator.to_owned());
        self
    }

    /// Annotate every key with `scope`.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

impl KeyValueSource for EnvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> ScopedResult<Vec<RawEntry>> {
        let mut env = Env::prefixed(self.prefix.as_str());
        if let Some(separator) = &self.separator {
            env = env.split(separator.as_str());
        }
        let mut entries: Vec<RawEntry> = env
            .iter()
            .map(|(key, value)| {
                let raw_key = match &self.scope {
                    Some(scope) => format!("({scope}){}", key.as_str()),
                    None => key.as_str().to_owned(),
                };
                RawEntry::new(raw_key, value)
            })
            .collect();
        entries.sort_by(|a, b| a.raw_key.cmp(&b.raw_key));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    #[rstest]
    fn reads_prefixed_variables() {
        Jail::expect_with(|jail| {
            jail.set_env("SCOPETEST_PORT", "8080");
            jail.set_env("SCOPETEST_DB__URL", "jdbc:x");
            jail.set_env("OTHER_PORT", "1");
            let entries = EnvSource::prefixed("SCOPETEST_")
                .split("__")
                .entries()
                .map_err(|err| err.to_string())?;
            let keys: Vec<_> = entries.iter().map(|e| e.raw_key.as_str()).collect();
            assert_eq!(keys, ["db.url", "port"]);
            Ok(())
        });
    }

    #[rstest]
    fn is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<EnvSource>();
        let shared: std::sync::Arc<dyn KeyValueSource> =
            std::sync::Arc::new(EnvSource::prefixed("SCOPETEST_").split("__"));
        assert_eq!(shared.name(), "environment (SCOPETEST_*)");
    }

    #[rstest]
    fn annotates_scope() {
        Jail::expect_with(|jail| {
            jail.set_env("SCOPETEST_PORT", "9090");
            let entries = EnvSource::prefixed("SCOPETEST_")
                .scope("env")
                .entries()
                .map_err(|err| err.to_string())?;
            assert_eq!(entries, vec![RawEntry::new("(env)port", "9090")]);
            Ok(())
        });
    }
}
