//! Raw and resolved property entries.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::key::ScopeKey;

/// A key/value pair exactly as a source produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawEntry {
    /// Key text, possibly carrying a scope annotation.
    pub raw_key: String,
    /// Value text.
    pub value: String,
}

impl RawEntry {
    /// Create a raw entry.
    #[must_use]
    pub fn new(raw_key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            raw_key: raw_key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for RawEntry {
    fn from((raw_key, value): (K, V)) -> Self {
        Self::new(raw_key, value)
    }
}

/// A value paired with its parsed key identity.
///
/// Entries compare, hash and sort by [`ScopeKey`], i.e. by raw key.
#[derive(Clone, Debug)]
pub struct ResolvedEntry {
    identity: ScopeKey,
    value: String,
}

impl ResolvedEntry {
    /// Pair `identity` with `value`.
    #[must_use]
    pub fn new(identity: ScopeKey, value: impl Into<String>) -> Self {
        Self {
            identity,
            value: value.into(),
        }
    }

    /// The parsed key identity.
    #[must_use]
    pub const fn identity(&self) -> &ScopeKey {
        &self.identity
    }

    /// Shorthand for `identity().logical_key()`.
    #[must_use]
    pub fn logical_key(&self) -> &str {
        self.identity.logical_key()
    }

    /// Shorthand for `identity().scope()`.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.identity.scope()
    }

    /// Shorthand for `identity().raw_key()`.
    #[must_use]
    pub fn raw_key(&self) -> &str {
        self.identity.raw_key()
    }

    /// The value text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl PartialEq for ResolvedEntry {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for ResolvedEntry {}

impl Hash for ResolvedEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl PartialOrd for ResolvedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResolvedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity.cmp(&other.identity)
    }
}

impl fmt::Display for ResolvedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scope) = self.scope().filter(|scope| !scope.is_empty()) {
            write!(f, "{scope}: ")?;
        }
        write!(f, "{}={}", self.logical_key(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::{RawEntry, ResolvedEntry};
    use crate::key::ScopeKey;

    #[test]
    fn display_matches_diagnostic_format() {
        let scoped = ResolvedEntry::new(ScopeKey::scoped("p", "x", "(p)x"), "2");
        let plain = ResolvedEntry::new(ScopeKey::unscoped("x"), "1");
        assert_eq!(scoped.to_string(), "p: x=2");
        assert_eq!(plain.to_string(), "x=1");
    }

    #[test]
    fn equality_ignores_value() {
        let first = ResolvedEntry::new(ScopeKey::unscoped("x"), "1");
        let second = ResolvedEntry::new(ScopeKey::unscoped("x"), "2");
        assert_eq!(first, second);
    }

    #[test]
    fn raw_entries_convert_from_pairs() {
        let entry: RawEntry = ("(a)b", "c").into();
        assert_eq!(entry, RawEntry::new("(a)b", "c"));
    }
}
