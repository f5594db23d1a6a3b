//! Expansion of dotted scope paths into ordered scope lists.
//!
//! A deployment usually knows where it runs as a dotted path such as
//! `prod.eu.node7`. [`expand_scope_path`] turns that into the list of scopes
//! to search, most specific first, and [`ScopePathProvider`] lets callers
//! plug in where the path comes from.

use std::env;

use crate::{ScopedError, ScopedResult};

/// Lowest-priority scope appended by
/// [`fallback_to_default`](crate::ResolutionContextBuilder::fallback_to_default).
pub const DEFAULT_SCOPE: &str = "default";

/// Expand a dotted scope path into scopes, most specific first.
///
/// For segments `s0..sN`, every prefix end `e` from `N` down to `1`
/// contributes the joins of `s[b..e]` for `b` from `0` to `e - 1`. Segments
/// are trimmed, so `prod. eu` expands like `prod.eu`. A blank path expands to
/// nothing.
///
/// # Errors
///
/// Returns [`ScopedError::Validation`] if the path contains an empty segment
/// (for example `a..b` or `.a`).
///
/// # Examples
///
/// ```
/// use scoped_config::expand_scope_path;
///
/// assert_eq!(
///     expand_scope_path("a.b.c")?,
///     ["a.b.c", "b.c", "c", "a.b", "b", "a"]
/// );
/// # Ok::<_, scoped_config::ScopedError>(())
/// ```
pub fn expand_scope_path(path: &str) -> ScopedResult<Vec<String>> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(Vec::new());
    }
    let segments: Vec<&str> = path.split('.').map(str::trim).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(ScopedError::validation(
            "scope_path",
            format!("'{path}' contains an empty segment"),
        ));
    }
    let mut scopes = Vec::new();
    for end in (1..=segments.len()).rev() {
        for begin in 0..end {
            scopes.extend(segments.get(begin..end).map(|run| run.join(".")));
        }
    }
    Ok(scopes)
}

/// Supplies the dotted scope path of the running deployment.
pub trait ScopePathProvider {
    /// The scope path, or `None` when none is configured.
    ///
    /// # Errors
    ///
    /// Returns a [`ScopedError`] when the path exists but cannot be read.
    fn scope_path(&self) -> ScopedResult<Option<String>>;
}

/// A fixed scope path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticScopePath(Option<String>);

impl StaticScopePath {
    /// Provider always returning `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(Some(path.into()))
    }

    /// Provider that never has a path.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }
}

impl ScopePathProvider for StaticScopePath {
    fn scope_path(&self) -> ScopedResult<Option<String>> {
        Ok(self.0.clone())
    }
}

/// Reads the scope path from an environment variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvScopePath {
    var: String,
}

impl EnvScopePath {
    /// Provider reading `var`.
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the variable consulted.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl ScopePathProvider for EnvScopePath {
    fn scope_path(&self) -> ScopedResult<Option<String>> {
        match env::var(&self.var) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ScopedError::validation(
                self.var.clone(),
                "environment variable is not valid unicode",
            )),
        }
    }
}

impl<P: ScopePathProvider + ?Sized> ScopePathProvider for &P {
    fn scope_path(&self) -> ScopedResult<Option<String>> {
        (**self).scope_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, ensure};
    use figment::Jail;
    use rstest::rstest;

    #[rstest]
    #[case::one("a", &["a"])]
    #[case::two("a.b", &["a.b", "b", "a"])]
    #[case::three("a.b.c", &["a.b.c", "b.c", "c", "a.b", "b", "a"])]
    #[case::four(
        "w.x.y.z",
        &["w.x.y.z", "x.y.z", "y.z", "z", "w.x.y", "x.y", "y", "w.x", "x", "w"]
    )]
    #[case::trimmed("  a.b ", &["a.b", "b", "a"])]
    #[case::padded_segments("prod. eu", &["prod.eu", "eu", "prod"])]
    fn expands_paths(#[case] path: &str, #[case] expected: &[&str]) -> Result<()> {
        let scopes = expand_scope_path(path)?;
        ensure!(scopes == expected, "{path:?} expanded to {scopes:?}");
        Ok(())
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_paths_expand_to_nothing(#[case] path: &str) -> Result<()> {
        ensure!(expand_scope_path(path)?.is_empty());
        Ok(())
    }

    #[rstest]
    #[case("a..b")]
    #[case(".a")]
    #[case("a.")]
    #[case("a. .b")]
    fn empty_segments_are_rejected(#[case] path: &str) {
        let err = expand_scope_path(path).expect_err("empty segment should fail");
        assert!(matches!(err, ScopedError::Validation { ref field, .. } if field == "scope_path"));
    }

    #[rstest]
    fn static_provider_returns_its_path() -> Result<()> {
        ensure!(StaticScopePath::new("p.q").scope_path()? == Some("p.q".to_owned()));
        ensure!(StaticScopePath::none().scope_path()?.is_none());
        Ok(())
    }

    #[rstest]
    fn env_provider_reads_variable() {
        Jail::expect_with(|jail| {
            let provider = EnvScopePath::new("SCOPED_CONFIG_TEST_PATH");
            assert_eq!(provider.scope_path().map_err(|e| e.to_string())?, None);
            jail.set_env("SCOPED_CONFIG_TEST_PATH", "prod.eu");
            assert_eq!(
                provider.scope_path().map_err(|e| e.to_string())?,
                Some("prod.eu".to_owned())
            );
            Ok(())
        });
    }
}
