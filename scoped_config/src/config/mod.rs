//! The resolved configuration and the resolver that produces it.

mod access;
mod value;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    KeyResolver, ParenthesesResolver, PropertySnapshot, ResolutionContext, ResolvedEntry,
    ScopedError, ScopedResult, SourceErrorPolicy, SourceLoader, filter,
};

pub use access::Configuration;
pub use value::PropertyValue;

/// Runs loading and scope filtering for a [`ResolutionContext`].
///
/// # Examples
///
/// ```
/// use scoped_config::{
///     Configuration, ConfigResolver, MapSource, ParenthesesResolver, ResolutionContext,
/// };
///
/// let context = ResolutionContext::builder()
///     .source(MapSource::new("inline", [("(default)x", "1"), ("(p)x", "2")]))
///     .scope("p")
///     .fallback_to_default()
///     .build()?;
/// let config = ConfigResolver::new(ParenthesesResolver).resolve(&context)?;
/// assert_eq!(config.get_string("x")?, "2");
/// # Ok::<_, scoped_config::ScopedError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigResolver<R = ParenthesesResolver> {
    loader: SourceLoader<R>,
}

impl<R: KeyResolver> ConfigResolver<R> {
    /// Resolver parsing keys with `resolver`.
    pub const fn new(resolver: R) -> Self {
        Self {
            loader: SourceLoader::new(resolver),
        }
    }

    /// Load the context's sources, filter by its scopes and index the
    /// winners by logical key.
    ///
    /// # Errors
    ///
    /// Returns [`ScopedError::SourceLoad`] when a source fails and the
    /// context's policy is [`SourceErrorPolicy::Abort`].
    pub fn resolve(&self, context: &ResolutionContext) -> ScopedResult<ResolvedConfiguration> {
        let entries = match context.source_error_policy() {
            SourceErrorPolicy::Abort => self.loader.load(context.sources())?,
            SourceErrorPolicy::Skip => {
                let outcome = self.loader.load_partitioned(context.sources());
                for err in &outcome.errors {
                    tracing::warn!(error = %err, "skipping property source");
                }
                outcome.entries
            }
        };
        let config = ResolvedConfiguration::from_entries(filter(entries, context.scopes()));
        config.log_summary(context.scopes());
        Ok(config)
    }
}

#[derive(Debug)]
enum State {
    Ready(HashMap<String, ResolvedEntry>),
    Destroyed,
}

/// The winning entry for each logical key.
///
/// Read through the [`Configuration`] trait. After [`destroy`](Self::destroy)
/// every accessor fails with [`ScopedError::Destroyed`].
#[derive(Debug)]
pub struct ResolvedConfiguration {
    state: State,
}

impl ResolvedConfiguration {
    /// Resolve `context` with the default key grammar.
    ///
    /// # Errors
    ///
    /// See [`ConfigResolver::resolve`].
    pub fn load(context: &ResolutionContext) -> ScopedResult<Self> {
        ConfigResolver::new(ParenthesesResolver).resolve(context)
    }

    /// Index already-filtered entries by logical key.
    ///
    /// When several entries share a logical key the first one is kept.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = ResolvedEntry>) -> Self {
        let mut map = HashMap::new();
        for entry in entries {
            map.entry(entry.logical_key().to_owned()).or_insert(entry);
        }
        Self {
            state: State::Ready(map),
        }
    }

    fn ready(&self, key: &str) -> ScopedResult<&HashMap<String, ResolvedEntry>> {
        match &self.state {
            State::Ready(map) => Ok(map),
            State::Destroyed => Err(ScopedError::destroyed(key)),
        }
    }

    /// The winning entry for `key`, showing which scope supplied it.
    ///
    /// # Errors
    ///
    /// Returns [`ScopedError::Destroyed`] after teardown.
    pub fn entry(&self, key: &str) -> ScopedResult<Option<&ResolvedEntry>> {
        Ok(self.ready(key)?.get(key))
    }

    /// Every winning entry sorted by raw key.
    ///
    /// # Errors
    ///
    /// Returns [`ScopedError::Destroyed`] after teardown.
    pub fn entries_sorted(&self) -> ScopedResult<Vec<&ResolvedEntry>> {
        let mut entries: Vec<_> = self.ready("*")?.values().collect();
        entries.sort();
        Ok(entries)
    }

    /// Number of resolved keys; zero once destroyed.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.state {
            State::Ready(map) => map.len(),
            State::Destroyed => 0,
        }
    }

    /// Whether no key resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether [`destroy`](Self::destroy) has been called.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        matches!(self.state, State::Destroyed)
    }

    /// Release every value. Further reads fail; calling again is a no-op.
    pub fn destroy(&mut self) {
        if let State::Ready(map) = std::mem::replace(&mut self.state, State::Destroyed) {
            tracing::info!(properties = map.len(), "destroyed resolved configuration");
        }
    }

    /// Logical keys mapped to values, skipping empty keys and empty values.
    ///
    /// # Errors
    ///
    /// Returns [`ScopedError::Destroyed`] after teardown.
    pub fn to_property_map(&self) -> ScopedResult<BTreeMap<String, String>> {
        Ok(self
            .ready("*")?
            .iter()
            .filter(|(key, entry)| !key.is_empty() && !entry.value().is_empty())
            .map(|(key, entry)| (key.clone(), entry.value().to_owned()))
            .collect())
    }

    /// A [`figment::Provider`] over [`to_property_map`](Self::to_property_map).
    ///
    /// # Errors
    ///
    /// Returns [`ScopedError::Destroyed`] after teardown.
    pub fn snapshot(&self) -> ScopedResult<PropertySnapshot> {
        self.to_property_map().map(PropertySnapshot::new)
    }

    /// Log the requested scopes and every resolved property at `info`.
    pub fn log_summary(&self, scopes: &[String]) {
        if scopes.is_empty() {
            tracing::info!("No scopes initialised");
        } else {
            tracing::info!(scopes = %scopes.join(", "), "initialised scopes");
        }
        match self.entries_sorted() {
            Ok(entries) => {
                tracing::info!(properties = entries.len(), "resolved configuration");
                for entry in entries {
                    tracing::info!(%entry, "resolved property");
                }
            }
            Err(err) => tracing::info!(error = %err, "resolved configuration unavailable"),
        }
    }
}

impl Configuration for ResolvedConfiguration {
    fn keys(&self) -> ScopedResult<BTreeSet<&str>> {
        Ok(self.ready("*")?.keys().map(String::as_str).collect())
    }

    fn lookup(&self, key: &str) -> ScopedResult<Option<&str>> {
        Ok(self.ready(key)?.get(key).map(ResolvedEntry::value))
    }
}

#[cfg(test)]
mod tests;
