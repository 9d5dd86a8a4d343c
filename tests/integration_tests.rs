//! Integration tests for the Afterglow CLI

use std::process::{Command, Output};

/// Run the binary with caching off and no user config file
fn afterglow(args: &[&str]) -> Output {
    let missing_config = std::env::temp_dir().join("afterglow-no-such-config.toml");
    Command::new(env!("CARGO_BIN_EXE_afterglow"))
        .arg("--config")
        .arg(&missing_config)
        .args(args)
        .env("AFTERGLOW__CACHE__ENABLED", "false")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help with the help flag
#[test]
fn test_cli_help() {
    let output = afterglow(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("Sunrise and sunset quality"));
    assert!(stdout.contains("predict"));
    assert!(stdout.contains("serve"));
}

/// Test that the help subcommand describes predict's arguments
#[test]
fn test_cli_predict_help() {
    let output = afterglow(&["help", "predict"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<LATITUDE>"));
    assert!(stdout.contains("<LONGITUDE>"));
}

/// A missing subcommand is a usage error
#[test]
fn test_cli_requires_subcommand() {
    let output = afterglow(&[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_cli_unknown_command() {
    let output = afterglow(&["forecast", "tomorrow"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unrecognized subcommand"));
}

#[test]
fn test_predict_rejects_non_numeric_latitude() {
    let output = afterglow(&["predict", "north", "0"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value 'north'"), "got: {stderr}");
}

#[test]
fn test_serve_rejects_non_numeric_port() {
    let output = afterglow(&["serve", "--port", "abc"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value 'abc'"), "got: {stderr}");
}

#[test]
fn test_predict_rejects_out_of_range_coordinates() {
    let output = afterglow(&["predict", "95", "10"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("latitude 95 must be between -90 and 90"), "got: {stderr}");
}

#[test]
fn test_invalid_config_from_environment() {
    let output = Command::new(env!("CARGO_BIN_EXE_afterglow"))
        .args(["predict", "0", "0"])
        .env("AFTERGLOW__LOGGING__LEVEL", "loud")
        .env("AFTERGLOW__CACHE__ENABLED", "false")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level"));
}
