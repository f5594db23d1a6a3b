//! Tests for key identities and the parentheses grammar.

use std::collections::HashSet;

use rstest::rstest;

use super::{KeyResolver, ParenthesesResolver, ScopeKey};

#[rstest]
#[case("foo")]
#[case("db.url")]
#[case("(bar")]
#[case("bar)")]
#[case("(bar)")]
#[case("()bar")]
#[case("x(a)b")]
#[case(" (a)b")]
fn keys_without_valid_prefix_are_unscoped(#[case] raw: &str) {
    let key = ParenthesesResolver.resolve(raw);
    assert_eq!(key.scope(), None);
    assert_eq!(key.logical_key(), raw);
    assert_eq!(key.raw_key(), raw);
}

#[rstest]
#[case("(a)b", "a", "b")]
#[case("(foo)bar", "foo", "bar")]
#[case("(env.cluster)db.url", "env.cluster", "db.url")]
#[case("(a)b)c", "a", "b)c")]
#[case("(a)(b)c", "a", "(b)c")]
fn parenthesised_prefix_is_split(#[case] raw: &str, #[case] scope: &str, #[case] logical: &str) {
    let key = ParenthesesResolver.resolve(raw);
    assert_eq!(key.scope(), Some(scope));
    assert_eq!(key.logical_key(), logical);
    assert_eq!(key.raw_key(), raw);
}

#[test]
fn absent_input_resolves_to_absent_key() {
    assert!(ParenthesesResolver.resolve_optional(None).is_none());
    let key = ParenthesesResolver.resolve_optional(Some("(a)b"));
    assert_eq!(key.as_ref().and_then(ScopeKey::scope), Some("a"));
}

#[test]
fn identity_is_the_raw_key() {
    let first = ScopeKey::scoped("a", "b", "(a)b");
    let same_raw = ScopeKey::scoped("other", "thing", "(a)b");
    let same_parse = ScopeKey::scoped("a", "b", "[a]b");
    assert_eq!(first, same_raw);
    assert_ne!(first, same_parse);

    let set: HashSet<_> = [first, same_raw, same_parse].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn ordering_is_lexicographic_on_raw_key() {
    let mut keys = vec![
        ScopeKey::unscoped("zeta"),
        ScopeKey::scoped("p", "x", "(p)x"),
        ScopeKey::unscoped("alpha"),
    ];
    keys.sort();
    let raw: Vec<_> = keys.iter().map(ScopeKey::raw_key).collect();
    assert_eq!(raw, ["(p)x", "alpha", "zeta"]);
}

#[rstest]
#[case(ScopeKey::scoped("prod", "port", "(prod)port"), "prod:port")]
#[case(ScopeKey::unscoped("port"), "port")]
fn display_prefixes_scope(#[case] key: ScopeKey, #[case] expected: &str) {
    assert_eq!(key.to_string(), expected);
}

#[test]
fn resolver_is_usable_as_trait_object() {
    let resolver: Box<dyn KeyResolver> = Box::new(ParenthesesResolver);
    assert_eq!(resolver.resolve("(s)k").scope(), Some("s"));
}
