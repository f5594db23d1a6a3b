//! Default key grammar: a scope wrapped in parentheses at the start of the key.

use super::{KeyResolver, ScopeKey};

/// Resolves keys written as `(scope)key`.
///
/// The opening parenthesis must be the first character, the scope between
/// the parentheses must be non-empty, and something must follow the closing
/// parenthesis. Anything else is an unscoped key.
///
/// Only the first `)` closes the scope. Later ones stay in the logical key,
/// so `(a)b)c` is key `b)c` in scope `a` rather than being cut short at `b`.
///
/// # Examples
///
/// ```
/// use scoped_config::{KeyResolver, ParenthesesResolver};
///
/// let key = ParenthesesResolver.resolve("(production)db.url");
/// assert_eq!(key.scope(), Some("production"));
/// assert_eq!(key.logical_key(), "db.url");
///
/// let plain = ParenthesesResolver.resolve("db.url");
/// assert_eq!(plain.scope(), None);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ParenthesesResolver;

impl ParenthesesResolver {
    fn split(raw_key: &str) -> Option<(&str, &str)> {
        let rest = raw_key.strip_prefix('(')?;
        let (scope, key) = rest.split_once(')')?;
        if scope.is_empty() || key.is_empty() {
            return None;
        }
        Some((scope, key))
    }
}

impl KeyResolver for ParenthesesResolver {
    fn resolve(&self, raw_key: &str) -> ScopeKey {
        let Some((scope, key)) = Self::split(raw_key) else {
            return ScopeKey::unscoped(raw_key);
        };
        tracing::debug!(raw_key, scope, key, "resolved scoped key");
        ScopeKey::scoped(scope, key, raw_key)
    }
}
