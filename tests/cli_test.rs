// Command-line tests against the built snipgallery binary

use std::process::{Command, Output};

use serde_json::Value;

fn snipgallery(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_snipgallery"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("SNIPGALLERY_FAIL_ALLOC")
        .env_remove("SNIPGALLERY_HEAP_LIMIT")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to launch snipgallery")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is not UTF-8")
}

#[test]
fn test_run_hello_c_succeeds() {
    let output = snipgallery(&["run", "hello.c"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).ends_with("dynamicArray[4] = 40\n"));
}

#[test]
fn test_run_passes_allocation_guard_status_through() {
    let output = snipgallery(&["run", "hello.c", "--fail-alloc", "1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).ends_with("Memory allocation failed\n"));
}

#[test]
fn test_run_json_reports_outcome() {
    let output = snipgallery(&["run", "simple.c", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let outcome: Value = serde_json::from_str(&stdout(&output)).expect("Invalid JSON");
    assert_eq!(outcome["snippet"], "simple.c");
    assert_eq!(outcome["exit_code"], 0);
    assert_eq!(outcome["live_blocks"], 0);
}

#[test]
fn test_unknown_snippet_is_internal_error() {
    let output = snipgallery(&["run", "nope.c"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no snippet named 'nope.c'"));
}

#[test]
fn test_display_only_snippet_is_not_runnable() {
    let output = snipgallery(&["run", "hello.py"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_zero_overrides_rejected_at_parse() {
    for flag in ["--fail-alloc", "--heap-limit"] {
        let output = snipgallery(&["run", "hello.c", flag, "0"]);
        assert_eq!(output.status.code(), Some(2), "{} 0 was accepted", flag);
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn test_list_filters_by_language_as_json() {
    let output = snipgallery(&["list", "--language", "c", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let listed: Vec<Value> = serde_json::from_str(&stdout(&output)).expect("Invalid JSON");
    let ids: Vec<&str> = listed.iter().filter_map(|s| s["id"].as_str()).collect();
    assert_eq!(ids, vec!["hello.c", "simple.c"]);
    assert!(listed.iter().all(|s| s["runnable"] == true));
}

#[test]
fn test_list_rejects_unknown_language() {
    let output = snipgallery(&["list", "--language", "cobol"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_check_passes_for_builtin_demos() {
    let output = snipgallery(&["check", "--runs", "3"]);

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    for id in ["hello.c", "simple.c", "hello.cpp", "hello.ts"] {
        assert!(text.contains(id), "{} missing from check output", id);
    }
    assert!(!text.contains("DIFFERS"));
}
