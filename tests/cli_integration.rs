// CLI integration tests for locate/probe/symbols flows.
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_nrfjprog-loader");
    let mut command = Command::new(exe);
    command
        .env_remove("NRFJPROG_LIB_DIR")
        .env_remove("NRFJPROG_LIB_NAME")
        .env_remove("RUST_LOG");
    command
}

fn isolated(dir: &Path) -> Command {
    let mut command = cmd();
    command.args([
        "--no-system-search",
        "--lib-name",
        "libfake.so",
        "--lib-dir",
        dir.to_str().unwrap(),
    ]);
    command
}

fn parse_json(output: &[u8]) -> Value {
    let text = std::str::from_utf8(output).expect("utf8");
    serde_json::from_str(text.trim()).expect("valid json")
}

fn stderr_error(output: &Output) -> Value {
    let value = parse_json(&output.stderr);
    value.get("error").cloned().expect("error object")
}

#[test]
fn symbols_lists_entry_points_in_order() {
    let output = cmd().arg("symbols").output().expect("symbols");
    assert!(output.status.success());

    let value = parse_json(&output.stdout);
    assert_eq!(value["count"], 64);
    let symbols = value["symbols"].as_array().expect("symbols array");
    assert_eq!(symbols.len(), 64);
    assert_eq!(symbols[0]["field"], "dll_version");
    assert_eq!(symbols[0]["symbol"], "NRFJPROG_dll_version");
    assert_eq!(symbols[63]["symbol"], "NRFJPROG_qspi_custom");
}

#[test]
fn version_reports_package_version() {
    let output = cmd().arg("version").output().expect("version");
    assert!(output.status.success());
    let value = parse_json(&output.stdout);
    assert_eq!(value["name"], "nrfjprog-loader");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn locate_reports_dll_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = isolated(temp.path()).arg("locate").output().expect("locate");
    assert_eq!(output.status.code(), Some(3));

    let err = stderr_error(&output);
    assert_eq!(err["kind"], "DllNotFound");
    assert!(err["message"].as_str().unwrap().contains("libfake.so"));
    assert!(err["hint"].as_str().unwrap().contains("NRFJPROG_LIB_DIR"));
}

#[test]
fn locate_finds_library_in_lib_dir() {
    let temp = tempfile::tempdir().expect("tempdir");
    let lib = temp.path().join("libfake.so");
    fs::write(&lib, b"").expect("write");

    let output = isolated(temp.path()).arg("locate").output().expect("locate");
    assert!(output.status.success());

    let value = parse_json(&output.stdout);
    assert_eq!(value["library"], "libfake.so");
    assert_eq!(value["path"], lib.display().to_string());
}

#[test]
fn locate_honours_environment_dirs() {
    let temp = tempfile::tempdir().expect("tempdir");
    let lib = temp.path().join("libfake.so");
    fs::write(&lib, b"").expect("write");

    let output = cmd()
        .env("NRFJPROG_LIB_DIR", temp.path())
        .env("NRFJPROG_LIB_NAME", "libfake.so")
        .args(["--no-system-search", "locate"])
        .output()
        .expect("locate");
    assert!(output.status.success());
    assert_eq!(parse_json(&output.stdout)["path"], lib.display().to_string());
}

#[test]
fn probe_rejects_file_that_is_not_a_library() {
    let temp = tempfile::tempdir().expect("tempdir");
    let lib = temp.path().join("libfake.so");
    fs::write(&lib, b"definitely not a shared object").expect("write");

    let output = isolated(temp.path()).arg("probe").output().expect("probe");
    assert_eq!(output.status.code(), Some(4));

    let err = stderr_error(&output);
    assert_eq!(err["kind"], "CouldNotLoadLibrary");
    assert_eq!(err["path"], lib.display().to_string());
    assert!(err.get("causes").is_some());
}

#[test]
fn probe_without_library_is_dll_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = isolated(temp.path()).arg("probe").output().expect("probe");
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(stderr_error(&output)["kind"], "DllNotFound");
}

#[test]
fn unknown_flag_is_usage_error() {
    let output = cmd().arg("--bogus").output().expect("run");
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr_error(&output)["kind"], "Usage");
}
