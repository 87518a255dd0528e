// tests/command_matching.rs

use simcli::config::Config;
use simcli::engine::{resolve, select, MatchKind};
use simcli::errors::SimError;
use simcli_test_utils::builders::{CommandConfigBuilder, ConfigBuilder};

fn config_with_default() -> Config {
    ConfigBuilder::new()
        .with_command(CommandConfigBuilder::new("status").contains().exit_code(1).build())
        .with_command(CommandConfigBuilder::new("git status").exit_code(2).build())
        .with_command(CommandConfigBuilder::new("push").contains().exit_code(3).build())
        .with_command(CommandConfigBuilder::new("commit").exit_code(4).build())
        .with_default_command(CommandConfigBuilder::new("").exit_code(99).build())
        .build()
}

#[test]
fn exact_match_wins_over_contains() {
    let cfg = config_with_default();

    // "git status" also contains "status", which appears earlier in config.
    let m = resolve(&cfg, "git status").unwrap();
    assert_eq!(m.kind, MatchKind::Exact);
    assert_eq!(m.command.exit_code, 2);
}

#[test]
fn contains_match_picks_first_in_config_order() {
    let cfg = config_with_default();

    let m = resolve(&cfg, "push --force status").unwrap();
    assert_eq!(m.kind, MatchKind::Contains);
    assert_eq!(m.command.args, "status");
}

#[test]
fn exact_mode_commands_never_match_by_substring() {
    let cfg = config_with_default();

    assert!(resolve(&cfg, "commit -m msg").is_none());
}

#[test]
fn exact_key_of_contains_command_matches_exactly() {
    let cfg = config_with_default();

    let m = resolve(&cfg, "push").unwrap();
    assert_eq!(m.kind, MatchKind::Exact);
    assert_eq!(m.command.exit_code, 3);
}

#[test]
fn falls_back_to_default_command() {
    let cfg = config_with_default();

    let m = select(&cfg, "log --oneline").unwrap();
    assert_eq!(m.kind, MatchKind::Default);
    assert_eq!(m.command.exit_code, 99);
}

#[test]
fn empty_invocation_uses_default() {
    let cfg = config_with_default();

    let m = select(&cfg, "").unwrap();
    assert_eq!(m.kind, MatchKind::Default);
}

#[test]
fn no_match_and_no_default_is_an_error() {
    let cfg = ConfigBuilder::new()
        .with_command(CommandConfigBuilder::new("build").build())
        .build();

    match select(&cfg, "test") {
        Err(SimError::NoMatchingCommand(inv)) => assert_eq!(inv, "test"),
        Err(e) => panic!("Expected NoMatchingCommand, got: {e:?}"),
        Ok(m) => panic!("Expected error, got match {:?}", m.kind),
    }
}

#[test]
fn matching_is_deterministic() {
    let cfg = config_with_default();

    for _ in 0..3 {
        let m = select(&cfg, "please push").unwrap();
        assert_eq!(m.command.args, "push");
    }
}
