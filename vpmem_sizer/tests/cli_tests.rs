//! Binary-level tests: argument handling, profiles and report output.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn sizer_with_log(args: &[&str], rust_log: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vpmem_sizer"));
    cmd.args(args);
    match rust_log {
        Some(filter) => cmd.env("RUST_LOG", filter),
        None => cmd.env_remove("RUST_LOG"),
    };
    cmd.output().expect("spawn vpmem_sizer")
}

fn sizer(args: &[&str]) -> Output {
    sizer_with_log(args, Some("error"))
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn text_report_for_linux_example() {
    let out = sizer(&["--memory", "1000", "--lun", "6000", "--linux"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("    max_memory_size     = 1281GB\n"));
    assert!(text.contains("    LUN 6000GB          = 8TB..16TB\n"));
    assert!(text.contains("Change the maximum memory size from 1000GB to 1281GB."));
    assert!(!text.contains("WARNING"));
}

#[test]
fn linux_warning_line_is_printed() {
    let out = sizer(&["-m", "1000", "-l", "4x16384", "-n"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains(
        "*** WARNING: This configuration may not fit within Linux's 64TB memory footprint restriction. ***"
    ));
}

#[test]
fn json_report_parses() {
    let out = sizer(&["-m", "3000", "-l", "16x1024", "-n", "--output", "json"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(value["layout"]["entries"].as_array().unwrap().len(), 17);
    assert_eq!(value["request"]["partition_kind"], "linux");
}

#[test]
fn missing_memory_fails() {
    let out = sizer(&["--lun", "6000", "--aix"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("--memory"));
}

#[test]
fn conflicting_partition_kinds_fail() {
    let out = sizer(&["-m", "1000", "--aix", "--ibmi"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn malformed_lun_fails_with_status_1() {
    let out = sizer(&["-m", "1000", "-l", "3x", "-n"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("3x"));
}

#[test]
fn unknown_flag_fails_with_status_1() {
    let out = sizer(&["-m", "1000", "-n", "--bogus"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn help_exits_cleanly() {
    let out = sizer(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("--memory"));
}

#[test]
fn rust_log_off_silences_logs() {
    let out = sizer_with_log(&["-m", "1000", "-l", "6000", "-n"], Some("off"));
    assert!(out.status.success());
    assert!(stderr(&out).is_empty(), "{}", stderr(&out));
}

#[test]
fn default_level_logs_plan_summary() {
    let out = sizer_with_log(&["-m", "1000", "-l", "6000", "-n"], None);
    assert!(out.status.success());
    assert!(stderr(&out).contains("sizing plan computed"));
}

#[test]
fn sizing_error_reported_once() {
    let out = sizer_with_log(&["-l", "6000", "-a"], None);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out).matches("Must specify the --memory option").count(), 1);
}

#[test]
fn profile_supplies_inputs() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[shared]
log_level = "error"

[partition]
kind = "aix"
memory_gb = 3000
luns = ["6000", "5000"]
"#
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap();
    let out = sizer(&["--config", path, "--lun", "6000"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("    vpmem_size          = 17000GB\n"));
    assert!(text.contains("    elmm_end_address    = 32TB\n"));
}

#[test]
fn missing_profile_fails() {
    let out = sizer(&["--config", "/nonexistent/lpar.toml"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out).matches("Configuration file not found").count(), 1);
}
