//! Earliest-scope-wins selection of loaded entries.

use std::collections::HashSet;

use crate::ResolvedEntry;

/// Pick one winning entry per logical key by walking `scopes` in order.
///
/// With no scopes every entry passes through untouched, including several
/// entries for the same logical key. Otherwise only entries whose scope is
/// listed take part: the first listed scope that defines a logical key wins
/// it, and unscoped entries are dropped. The output is ordered by winning
/// scope, then by load order.
///
/// # Examples
///
/// ```
/// use scoped_config::{KeyResolver, ParenthesesResolver, ResolvedEntry, filter};
///
/// let entries = ["(default)x", "(p)x"]
///     .into_iter()
///     .map(|raw| ResolvedEntry::new(ParenthesesResolver.resolve(raw), raw))
///     .collect::<Vec<_>>();
/// let winners = filter(entries, &["p", "default"]);
/// assert_eq!(winners.len(), 1);
/// assert_eq!(winners[0].scope(), Some("p"));
/// ```
#[must_use]
pub fn filter<S: AsRef<str>>(entries: Vec<ResolvedEntry>, scopes: &[S]) -> Vec<ResolvedEntry> {
    if scopes.is_empty() {
        tracing::debug!(entries = entries.len(), "no scopes requested; keeping every entry");
        return entries;
    }
    let total = entries.len();
    let mut pending: Vec<Option<ResolvedEntry>> = entries.into_iter().map(Some).collect();
    let mut assigned: HashSet<String> = HashSet::new();
    let mut winners = Vec::new();
    for scope in scopes {
        let scope = scope.as_ref();
        for slot in &mut pending {
            let matches = slot.as_ref().is_some_and(|entry| {
                entry.scope() == Some(scope) && !assigned.contains(entry.logical_key())
            });
            if !matches {
                continue;
            }
            if let Some(entry) = slot.take() {
                assigned.insert(entry.logical_key().to_owned());
                winners.push(entry);
            }
        }
    }
    tracing::debug!(
        entries = total,
        scopes = scopes.len(),
        winners = winners.len(),
        "filtered entries by scope"
    );
    winners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyResolver, ParenthesesResolver};
    use rstest::rstest;

    fn entries(pairs: &[(&str, &str)]) -> Vec<ResolvedEntry> {
        pairs
            .iter()
            .map(|(raw, value)| ResolvedEntry::new(ParenthesesResolver.resolve(raw), *value))
            .collect()
    }

    fn raw_keys(entries: &[ResolvedEntry]) -> Vec<&str> {
        entries.iter().map(ResolvedEntry::raw_key).collect()
    }

    #[rstest]
    fn earliest_scope_wins() {
        let input = entries(&[("(s2)k", "b"), ("(s1)k", "a")]);
        let winners = filter(input, &["s1", "s2"]);
        assert_eq!(raw_keys(&winners), ["(s1)k"]);
        assert_eq!(winners[0].value(), "a");
    }

    #[rstest]
    fn unscoped_and_unrequested_entries_are_dropped() {
        let input = entries(&[("k", "plain"), ("(other)k", "o"), ("(s)j", "j")]);
        let winners = filter(input, &["s"]);
        assert_eq!(raw_keys(&winners), ["(s)j"]);
    }

    #[rstest]
    fn orders_by_winning_scope_then_load_order() {
        let input = entries(&[
            ("(default)a", "1"),
            ("(p)b", "2"),
            ("(default)c", "3"),
            ("(p)a", "4"),
        ]);
        let winners = filter(input, &["p", "default"]);
        assert_eq!(raw_keys(&winners), ["(p)b", "(p)a", "(default)c"]);
    }

    #[rstest]
    fn empty_scopes_pass_everything_through() {
        let input = entries(&[("(default)x", "1"), ("(p)x", "2"), ("x", "3")]);
        let out = filter(input, &[] as &[&str]);
        assert_eq!(out.len(), 3);
    }

    #[rstest]
    fn no_match_is_empty_not_an_error() {
        let input = entries(&[("(a)k", "1")]);
        assert!(filter(input, &["b"]).is_empty());
    }

    #[rstest]
    fn at_most_one_winner_per_logical_key() {
        let input = entries(&[("(a)k", "1"), ("(b)k", "2"), ("(c)k", "3"), ("(b)j", "4")]);
        let winners = filter(input, &["c", "b", "a"]);
        assert_eq!(raw_keys(&winners), ["(c)k", "(b)j"]);
    }
}
