//! Integration tests for CLI argument handling
//!
//! Only exercises paths that exit before rendering the TUI; network calls
//! go to a closed local port.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_folio"))
        .args(args)
        .output()
        .expect("Failed to execute folio")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("folio"), "Help should mention folio");
    assert!(stdout.contains("--username"), "Help should mention --username");
    assert!(stdout.contains("--no-forks"), "Help should mention --no-forks");
    assert!(stdout.contains("--print"), "Help should mention --print");
}

#[test]
fn test_export_without_print_is_rejected() {
    let output = run_cli(&["--export", "portfolio-data.json"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--print"), "Should explain the missing flag: {}", stderr);
}

#[test]
fn test_invalid_api_base_fails_fast() {
    let output = run_cli(&["--print", "--api-base", "not a url"]);
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid API base URL"), "Unexpected stderr: {}", stderr);
}

#[test]
fn test_print_blank_username_uses_default() {
    let output = run_cli(&["--print", "-u", "  ", "--api-base", "http://127.0.0.1:1"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("identity required"),
        "Blank username should fall back to the default: {}",
        stderr
    );
    assert!(
        stderr.contains("GitHub API request failed"),
        "Expected a transport failure: {}",
        stderr
    );
}
