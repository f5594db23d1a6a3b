//! Tests for resolution and typed access.
#![expect(
    clippy::expect_used,
    reason = "fixtures panic to surface setup mistakes"
)]

use super::*;
use crate::{KeyValueSource, MapSource, RawEntry};
use anyhow::{Result, ensure};
use rstest::{fixture, rstest};
use std::sync::Arc;

#[fixture]
fn typed() -> ResolvedConfiguration {
    let context = ResolutionContext::builder()
        .source(MapSource::new(
            "typed",
            [
                ("(default)int", "42"),
                ("(default)long", "9000000000"),
                ("(default)short", "7"),
                ("(default)double", "2.5"),
                ("(default)float", "1.25"),
                ("(default)flag", "TRUE"),
                ("(default)other", "yes"),
                ("(default)text", "hello"),
                ("(default)blank", ""),
            ],
        ))
        .fallback_to_default()
        .build()
        .expect("context should build");
    ResolvedConfiguration::load(&context).expect("configuration should resolve")
}

#[rstest]
fn typed_getters_parse_values(typed: ResolvedConfiguration) -> Result<()> {
    ensure!(typed.get_int("int")? == 42);
    ensure!(typed.get_long("long")? == 9_000_000_000);
    ensure!(typed.get_short("short")? == 7);
    ensure!((typed.get_double("double")? - 2.5).abs() < f64::EPSILON);
    ensure!((typed.get_float("float")? - 1.25).abs() < f32::EPSILON);
    ensure!(typed.get_bool("flag")?);
    ensure!(!typed.get_bool("other")?);
    ensure!(typed.get_string("text")? == "hello");
    ensure!(typed.get::<u16>("int")? == 42);
    Ok(())
}

#[rstest]
fn defaults_apply_only_when_absent(typed: ResolvedConfiguration) -> Result<()> {
    ensure!(typed.get_int_or("absent", 5)? == 5);
    ensure!(typed.get_int_or("int", 5)? == 42);
    ensure!(typed.get_string_or("absent", "fallback")? == "fallback");
    ensure!(typed.get_bool_or("absent", true)?);
    ensure!(typed.get_long_or("absent", None).is_err());
    Ok(())
}

#[rstest]
#[case::int("absent")]
#[case::text("also_absent")]
fn missing_key_without_default(typed: ResolvedConfiguration, #[case] key: &str) {
    let err = typed.get_int(key).expect_err("absent key should fail");
    assert!(
        matches!(err, ScopedError::MissingKey { key: ref k, expected: "int" } if k == key),
        "unexpected error: {err:?}"
    );
    assert!(matches!(
        typed.get_string(key),
        Err(ScopedError::MissingKey { expected: "string", .. })
    ));
}

#[rstest]
fn format_error_wins_over_default(typed: ResolvedConfiguration) {
    let err = typed
        .get_int_or("text", 5)
        .expect_err("unparseable value should fail");
    assert!(
        matches!(err, ScopedError::Format { ref key, ref value, expected: "int", .. } if key == "text" && value == "hello"),
        "unexpected error: {err:?}"
    );
    assert!(matches!(
        typed.get_double("text"),
        Err(ScopedError::Format { expected: "double", .. })
    ));
}

#[rstest]
fn empty_value_is_present_but_not_numeric(typed: ResolvedConfiguration) -> Result<()> {
    ensure!(typed.get_string("blank")?.is_empty());
    ensure!(matches!(typed.get_int_or("blank", 1), Err(ScopedError::Format { .. })));
    Ok(())
}

#[rstest]
fn keys_lists_logical_keys(typed: ResolvedConfiguration) -> Result<()> {
    let keys = typed.keys()?;
    ensure!(keys.contains("int") && keys.contains("blank"));
    ensure!(keys.len() == 9);
    Ok(())
}

#[rstest]
fn property_map_skips_empty_values(typed: ResolvedConfiguration) -> Result<()> {
    let map = typed.to_property_map()?;
    ensure!(!map.contains_key("blank"));
    ensure!(map.get("int").map(String::as_str) == Some("42"));
    Ok(())
}

#[rstest]
fn destroy_blocks_every_accessor(mut typed: ResolvedConfiguration) {
    typed.destroy();
    typed.destroy();
    assert!(typed.is_destroyed());
    assert!(typed.is_empty());
    assert!(matches!(typed.get_string_or("int", "x"), Err(ScopedError::Destroyed { .. })));
    assert!(matches!(typed.get_int_or("int", 1), Err(ScopedError::Destroyed { .. })));
    assert!(matches!(typed.keys(), Err(ScopedError::Destroyed { .. })));
    assert!(matches!(typed.entry("int"), Err(ScopedError::Destroyed { .. })));
    assert!(matches!(typed.entries_sorted(), Err(ScopedError::Destroyed { .. })));
    assert!(matches!(typed.to_property_map(), Err(ScopedError::Destroyed { .. })));
    let err = typed.get_bool("flag").expect_err("destroyed");
    assert_eq!(err.key(), Some("flag"));
}

#[rstest]
fn entry_reports_winning_scope() -> Result<()> {
    let context = ResolutionContext::builder()
        .source(MapSource::new("s", [("(default)x", "1"), ("(p)x", "2")]))
        .scope("p")
        .fallback_to_default()
        .build()?;
    let config = ResolvedConfiguration::load(&context)?;
    let entry = config.entry("x")?.ok_or_else(|| anyhow::anyhow!("x missing"))?;
    ensure!(entry.scope() == Some("p"));
    ensure!(entry.raw_key() == "(p)x");
    Ok(())
}

#[rstest]
fn pass_through_keeps_first_entry_per_logical_key() -> Result<()> {
    let context = ResolutionContext::builder()
        .source(MapSource::new("s", [("(a)x", "1"), ("(b)x", "2"), ("y", "3")]))
        .without_scopes()
        .build()?;
    let config = ResolvedConfiguration::load(&context)?;
    ensure!(config.len() == 2);
    ensure!(config.get_string("x")? == "1");
    ensure!(config.get_string("y")? == "3");
    Ok(())
}

#[rstest]
fn entries_sorted_orders_by_raw_key() -> Result<()> {
    let config = ResolvedConfiguration::from_entries(
        ["z", "(b)y", "(a)x"]
            .into_iter()
            .map(|raw| ResolvedEntry::new(ParenthesesResolver.resolve(raw), "v")),
    );
    let raws: Vec<_> = config
        .entries_sorted()?
        .into_iter()
        .map(ResolvedEntry::raw_key)
        .collect();
    ensure!(raws == ["(a)x", "(b)y", "z"]);
    Ok(())
}

#[derive(Debug)]
struct Broken;

impl KeyValueSource for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn entries(&self) -> ScopedResult<Vec<RawEntry>> {
        Err(ScopedError::source_load("broken", "offline"))
    }
}

#[rstest]
#[case::abort(SourceErrorPolicy::Abort, false)]
#[case::skip(SourceErrorPolicy::Skip, true)]
fn source_error_policy(#[case] policy: SourceErrorPolicy, #[case] succeeds: bool) -> Result<()> {
    let context = ResolutionContext::builder()
        .shared_source(Arc::new(Broken))
        .source(MapSource::new("ok", [("(default)k", "v")]))
        .fallback_to_default()
        .on_source_error(policy)
        .build()?;
    let result = ConfigResolver::new(ParenthesesResolver).resolve(&context);
    ensure!(result.is_ok() == succeeds, "unexpected result: {result:?}");
    if let Ok(config) = result {
        ensure!(config.get_string("k")? == "v");
    }
    Ok(())
}
