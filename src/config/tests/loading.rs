//! Tests for loading configuration from the environment and command line.

use rstest::rstest;

use super::helpers::load_with_env;

#[rstest]
fn repository_and_authors_load_from_short_flags() {
    let config = load_with_env(
        &[("DEVSTATS_REPO", None), ("DEVSTATS_AUTHORS", None)],
        &["-r", "cockroachdb/cockroach", "-a", "alice,bob"],
    );

    assert_eq!(config.repo.as_deref(), Some("cockroachdb/cockroach"));
    assert_eq!(
        config.require_authors().expect("authors should be present"),
        vec!["alice".to_owned(), "bob".to_owned()]
    );
}

#[rstest]
fn repository_loads_from_prefixed_environment_variable() {
    let config = load_with_env(
        &[("DEVSTATS_REPO", Some("jtsiros/devstats"))],
        &[],
    );

    assert_eq!(config.repo.as_deref(), Some("jtsiros/devstats"));
}

#[rstest]
fn cli_flag_overrides_environment_variable() {
    let config = load_with_env(
        &[("DEVSTATS_FROM", Some("2022-01-01"))],
        &["--from", "2024-03-01"],
    );

    assert_eq!(config.from.as_deref(), Some("2024-03-01"));
}

#[rstest]
fn workers_load_from_environment_variable() {
    let config = load_with_env(&[("DEVSTATS_WORKERS", Some("12"))], &[]);

    assert_eq!(config.workers, 12);
}

#[rstest]
fn telemetry_flag_enables_telemetry() {
    let config = load_with_env(&[], &["--telemetry"]);

    assert!(config.telemetry, "--telemetry should enable telemetry");
}
