//! Ordered loading of property sources with first-source-wins deduplication.

use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    KeyResolver, KeyValueSource, ParenthesesResolver, RawEntry, ResolvedEntry, ScopedError,
    ScopedResult,
};

/// What to do when a property source fails to load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceErrorPolicy {
    /// Fail resolution with the first source error.
    #[default]
    Abort,
    /// Log the failure, skip the source and keep going.
    Skip,
}

/// Result of a load that keeps going past failing sources.
#[derive(Debug, Default)]
#[must_use]
pub struct LoadOutcome {
    /// Entries from every source that loaded, in load order.
    pub entries: Vec<ResolvedEntry>,
    /// One error per source that failed, in source order.
    pub errors: Vec<Arc<ScopedError>>,
}

impl LoadOutcome {
    /// Return the entries, or every collected error combined.
    ///
    /// # Errors
    ///
    /// Returns the single source error, or [`ScopedError::Aggregate`] when
    /// several sources failed.
    pub fn into_result(self) -> ScopedResult<Vec<ResolvedEntry>> {
        match ScopedError::combine(self.errors) {
            Some(err) => Err(err),
            None => Ok(self.entries),
        }
    }
}

/// Reads sources in priority order and resolves each raw key.
///
/// The first source to define a given raw key wins; later definitions of the
/// same raw key are dropped. Different raw keys that share a logical key are
/// all kept, since choosing between them is the scope filter's job.
#[derive(Clone, Debug, Default)]
pub struct SourceLoader<R = ParenthesesResolver> {
    resolver: R,
}

impl<R: KeyResolver> SourceLoader<R> {
    /// Loader parsing keys with `resolver`.
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// The key resolver in use.
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Load every source, failing on the first source error.
    ///
    /// # Errors
    ///
    /// Returns [`ScopedError::SourceLoad`] for the first source whose entries
    /// cannot be read. Nothing from that source or later ones is applied.
    pub fn load(&self, sources: &[Arc<dyn KeyValueSource>]) -> ScopedResult<Vec<ResolvedEntry>> {
        let mut acc = Accumulator::default();
        for source in sources {
            let raw = source.entries()?;
            acc.absorb(&self.resolver, source.name(), raw);
        }
        Ok(acc.entries)
    }

    /// Load every source, skipping failed sources and recording their errors.
    pub fn load_partitioned(&self, sources: &[Arc<dyn KeyValueSource>]) -> LoadOutcome {
        let mut acc = Accumulator::default();
        let mut errors = Vec::new();
        for source in sources {
            match source.entries() {
                Ok(raw) => acc.absorb(&self.resolver, source.name(), raw),
                Err(err) => errors.push(Arc::new(err)),
            }
        }
        LoadOutcome {
            entries: acc.entries,
            errors,
        }
    }
}

#[derive(Default)]
struct Accumulator {
    seen: HashSet<String>,
    entries: Vec<ResolvedEntry>,
}

impl Accumulator {
    fn absorb<R: KeyResolver>(&mut self, resolver: &R, source: &str, raw: Vec<RawEntry>) {
        for RawEntry { raw_key, value } in raw {
            if self.seen.contains(&raw_key) {
                tracing::trace!(source, %raw_key, "shadowed by an earlier source");
                continue;
            }
            let identity = resolver.resolve(&raw_key);
            if identity.logical_key().is_empty() {
                tracing::warn!(source, %raw_key, "dropping property with an empty key");
                continue;
            }
            tracing::trace!(source, %raw_key, "loaded property");
            self.seen.insert(raw_key);
            self.entries.push(ResolvedEntry::new(identity, value));
        }
    }
}
