//! Builder for [`ResolutionContext`].
//!
//! Configuration mistakes are collected rather than reported one at a time,
//! so `build` can describe every problem at once.

use std::sync::Arc;

use super::ResolutionContext;
use crate::scope_path::{DEFAULT_SCOPE, ScopePathProvider, expand_scope_path};
use crate::{KeyValueSource, ScopedError, ScopedResult, SourceErrorPolicy};

/// Builder for [`ResolutionContext`].
///
/// The scope list starts out *unset*, which `build` rejects; call
/// [`without_scopes`](Self::without_scopes) to ask for the unfiltered
/// pass-through explicitly.
///
/// # Examples
///
/// ```
/// use scoped_config::{MapSource, ResolutionContext};
///
/// let context = ResolutionContext::builder()
///     .source(MapSource::new("inline", [("(prod)port", "80"), ("(default)port", "8080")]))
///     .scope("prod")
///     .fallback_to_default()
///     .build()?;
/// assert_eq!(context.scopes(), ["prod", "default"]);
/// # Ok::<_, scoped_config::ScopedError>(())
/// ```
#[derive(Default)]
#[must_use]
pub struct ResolutionContextBuilder {
    sources: Vec<Arc<dyn KeyValueSource>>,
    scopes: Option<Vec<String>>,
    fallback_to_default: bool,
    source_errors: SourceErrorPolicy,
    deferred: Vec<ScopedError>,
}

impl ResolutionContextBuilder {
    /// Builder with no sources and no scope list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source with lower priority than those already added.
    pub fn source(self, source: impl KeyValueSource + 'static) -> Self {
        self.shared_source(Arc::new(source))
    }

    /// Append a source that is shared with other contexts.
    pub fn shared_source(mut self, source: Arc<dyn KeyValueSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Append a scope with lower priority than those already added.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.get_or_insert_with(Vec::new).push(scope.into());
        self
    }

    /// Append several scopes in order.
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes
            .get_or_insert_with(Vec::new)
            .extend(scopes.into_iter().map(Into::into));
        self
    }

    /// Clear the scope list so every loaded entry passes through unfiltered.
    ///
    /// Also cancels an earlier [`fallback_to_default`](Self::fallback_to_default).
    pub fn without_scopes(mut self) -> Self {
        self.scopes = Some(Vec::new());
        self.fallback_to_default = false;
        self
    }

    /// Append the scopes derived from a dotted path, most specific first.
    ///
    /// An invalid path is reported by [`build`](Self::build).
    pub fn scope_path(mut self, path: &str) -> Self {
        match expand_scope_path(path) {
            Ok(scopes) => return self.scopes(scopes),
            Err(err) => self.deferred.push(err),
        }
        self.scopes.get_or_insert_with(Vec::new);
        self
    }

    /// Append the scopes for the path reported by `provider`, then the
    /// [`DEFAULT_SCOPE`] fallback.
    ///
    /// A missing path contributes only the fallback. Provider failures are
    /// reported by [`build`](Self::build).
    pub fn discover_scopes(self, provider: &dyn ScopePathProvider) -> Self {
        let this = match provider.scope_path() {
            Ok(Some(path)) => {
                tracing::debug!(%path, "discovered scope path");
                self.scope_path(&path)
            }
            Ok(None) => {
                tracing::debug!("no scope path configured");
                self
            }
            Err(err) => {
                let mut this = self;
                this.deferred.push(err);
                this
            }
        };
        this.fallback_to_default()
    }

    /// Append [`DEFAULT_SCOPE`] after every other scope when building.
    pub fn fallback_to_default(mut self) -> Self {
        self.fallback_to_default = true;
        self.scopes.get_or_insert_with(Vec::new);
        self
    }

    /// Choose how failing sources are handled during resolution.
    pub fn on_source_error(mut self, policy: SourceErrorPolicy) -> Self {
        self.source_errors = policy;
        self
    }

    /// Validate and freeze the context.
    ///
    /// # Errors
    ///
    /// Returns [`ScopedError::Validation`] when no source was added or the
    /// scope list was never configured, and also reports invalid scope
    /// paths. Several problems are combined into [`ScopedError::Aggregate`].
    pub fn build(self) -> ScopedResult<ResolutionContext> {
        let Self {
            sources,
            scopes,
            fallback_to_default,
            source_errors,
            mut deferred,
        } = self;
        if sources.is_empty() {
            deferred.push(ScopedError::validation(
                "sources",
                "at least one property source is required",
            ));
        }
        if scopes.is_none() {
            deferred.push(ScopedError::validation(
                "scopes",
                "scope list was never configured; add scopes or call `without_scopes`",
            ));
        }
        if let Some(err) = ScopedError::combine(deferred.into_iter().map(Arc::new).collect()) {
            return Err(err);
        }
        let mut scopes = scopes.unwrap_or_default();
        if fallback_to_default && !scopes.iter().any(|scope| scope == DEFAULT_SCOPE) {
            scopes.push(DEFAULT_SCOPE.to_owned());
        }
        Ok(ResolutionContext {
            sources,
            scopes,
            source_errors,
        })
    }
}
