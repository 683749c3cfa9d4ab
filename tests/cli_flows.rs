// End-to-end flows through the demo binary: one test per path of the
// execute pipeline, observed as a real process exit status.

mod common;

use common::run_demo;

// ---- Success ----

#[test]
fn flow_success_exits_zero() {
    let (stdout, stderr, exit_code) = run_demo(&["ok"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "ok\n");
    assert_eq!(stderr, "");
}

// ---- Failure and exit codes ----

#[test]
fn flow_failure_defaults_to_exit_one() {
    let (stdout, stderr, exit_code) = run_demo(&["fail", "--message", "boom"]);
    assert_eq!(exit_code, 1);
    assert_eq!(stdout, "");
    assert_eq!(stderr, "Error: boom\n");
}

#[test]
fn flow_failure_reports_attached_exit_code() {
    let (_, stderr, exit_code) = run_demo(&["fail", "--message", "boom", "--code", "42"]);
    assert_eq!(exit_code, 42);
    assert_eq!(stderr, "Error: boom\n");
}

#[test]
fn flow_empty_message_fails_silently() {
    let (stdout, stderr, exit_code) = run_demo(&["fail", "--message", ""]);
    assert_eq!(exit_code, 1);
    assert_eq!(stdout, "");
    assert_eq!(stderr, "");
}

#[test]
fn flow_debug_flag_prints_diagnostic_report() {
    let (_, stderr, exit_code) = run_demo(&["--debug", "fail", "--message", "boom", "--code", "3"]);
    assert_eq!(exit_code, 3);
    assert!(stderr.starts_with("Error: "), "got: {stderr}");
    assert!(stderr.contains("cli_executor::message"), "got: {stderr}");
    assert!(stderr.contains("boom"), "got: {stderr}");
}

#[test]
fn flow_global_debug_flag_after_subcommand() {
    let (_, stderr, _) = run_demo(&["fail", "--message", "boom", "--debug"]);
    assert!(stderr.contains("cli_executor::message"), "got: {stderr}");
}

// ---- Flag errors ----

#[test]
fn flow_unknown_flag_prints_message_and_usage_once() {
    let (stdout, stderr, exit_code) = run_demo(&["ok", "--foo"]);
    assert_eq!(exit_code, 1);
    assert_eq!(stdout, "");
    assert!(stderr.starts_with("Error: "), "got: {stderr}");
    assert!(stderr.contains("--foo"), "got: {stderr}");
    assert_eq!(stderr.matches("Usage:").count(), 1, "got: {stderr}");
    assert!(stderr.contains("Usage: exec-demo ok"), "got: {stderr}");
    assert!(!stderr.contains("\n\n"), "got: {stderr}");
}

#[test]
fn flow_unknown_subcommand_skips_usage_rewrite() {
    let (_, stderr, exit_code) = run_demo(&["nope"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.starts_with("Error: "), "got: {stderr}");
    assert!(!stderr.contains("Usage:"), "got: {stderr}");
}

// ---- Help ----

#[test]
fn flow_help_subcommand_is_removed() {
    let (stdout, stderr, exit_code) = run_demo(&["help"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "");
    assert_eq!(stderr, "");
}

#[test]
fn flow_help_flag_still_prints_help() {
    let (stdout, _, exit_code) = run_demo(&["--help"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("fail"), "got: {stdout}");
    assert!(!stdout.contains("Print this message"), "got: {stdout}");
}

#[test]
fn flow_missing_subcommand_prints_help_once() {
    let (stdout, stderr, exit_code) = run_demo(&[]);
    assert_eq!(exit_code, 1);
    assert_eq!(stdout, "");
    assert_eq!(stderr.matches("Usage:").count(), 1, "got: {stderr}");
}
