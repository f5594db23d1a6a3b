//! Parsing raw property keys into scope-aware identities.
//!
//! A raw key such as `(production)db.url` carries an optional scope
//! annotation in front of the logical key. [`KeyResolver`] implementations
//! decide how that annotation is written; [`ParenthesesResolver`] is the
//! default grammar.

mod parentheses;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

pub use parentheses::ParenthesesResolver;

/// Parsed identity of a raw property key.
///
/// Equality, hashing and ordering only consider the untouched raw key, so two
/// different raw keys are distinct identities even if they parse to the same
/// scope and logical key.
#[derive(Clone, Debug)]
pub struct ScopeKey {
    scope: Option<String>,
    logical_key: String,
    raw_key: String,
}

impl ScopeKey {
    /// Identity for a key without a scope annotation.
    #[must_use]
    pub fn unscoped(raw_key: impl Into<String>) -> Self {
        let raw_key = raw_key.into();
        Self {
            scope: None,
            logical_key: raw_key.clone(),
            raw_key,
        }
    }

    /// Identity for `raw_key`, which a resolver split into `scope` and
    /// `logical_key`.
    #[must_use]
    pub fn scoped(
        scope: impl Into<String>,
        logical_key: impl Into<String>,
        raw_key: impl Into<String>,
    ) -> Self {
        Self {
            scope: Some(scope.into()),
            logical_key: logical_key.into(),
            raw_key: raw_key.into(),
        }
    }

    /// The scope annotation, if the raw key carried one.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// The scope-independent key name.
    #[must_use]
    pub fn logical_key(&self) -> &str {
        &self.logical_key
    }

    /// The key exactly as it appeared in its source.
    #[must_use]
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    /// Whether the raw key carried a scope annotation.
    #[must_use]
    pub const fn is_scoped(&self) -> bool {
        self.scope.is_some()
    }
}

impl PartialEq for ScopeKey {
    fn eq(&self, other: &Self) -> bool {
        self.raw_key == other.raw_key
    }
}

impl Eq for ScopeKey {}

impl Hash for ScopeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw_key.hash(state);
    }
}

impl PartialOrd for ScopeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScopeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw_key.cmp(&other.raw_key)
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope() {
            Some(scope) if !scope.is_empty() => write!(f, "{scope}:{}", self.logical_key),
            _ => f.write_str(&self.logical_key),
        }
    }
}

/// Strategy that splits a raw key into a [`ScopeKey`].
///
/// Resolution never fails: input that does not match the grammar is treated
/// as an unscoped logical key.
pub trait KeyResolver: Send + Sync {
    /// Parse `raw_key` into its scope and logical key.
    fn resolve(&self, raw_key: &str) -> ScopeKey;

    /// Parse an optional key, propagating absence.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_config::{KeyResolver, ParenthesesResolver};
    /// assert!(ParenthesesResolver.resolve_optional(None).is_none());
    /// ```
    fn resolve_optional(&self, raw_key: Option<&str>) -> Option<ScopeKey> {
        raw_key.map(|key| self.resolve(key))
    }
}

impl<R: KeyResolver + ?Sized> KeyResolver for &R {
    fn resolve(&self, raw_key: &str) -> ScopeKey {
        (**self).resolve(raw_key)
    }
}

impl<R: KeyResolver + ?Sized> KeyResolver for Box<R> {
    fn resolve(&self, raw_key: &str) -> ScopeKey {
        (**self).resolve(raw_key)
    }
}

#[cfg(test)]
mod tests;
