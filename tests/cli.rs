// End-to-end tests of the `expr` binary

use std::fs;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_expr"))
        .args(args)
        .output()
        .expect("failed to run expr binary")
}

#[test]
fn prints_result_on_one_line() {
    let output = run(&["2^3^2"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "512\n");
}

#[test]
fn accepts_leading_negation() {
    let output = run(&["-7/2"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "-3\n");
}

#[test]
fn missing_expression_prints_usage() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "usage: expr [--dot ast.dot] <expr>\nexample: expr \"1+2+3\"\n"
    );
}

#[test]
fn division_by_zero_fails_without_output() {
    let output = run(&["1/0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Division by zero"));
}

#[test]
fn malformed_input_fails() {
    let output = run(&["(1+2"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn dot_flag_writes_graph() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ast.dot");
    let path_str = path.to_str().unwrap();

    let output = run(&["--dot", path_str, "1+2+3"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "6\n");

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("digraph G {\n"));
    assert!(contents.ends_with("}\n"));
}

#[test]
fn single_dash_dot_flag_writes_graph() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ast.dot");
    let path_str = path.to_str().unwrap();

    let output = run(&["-dot", path_str, "1+2"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "3\n");
    assert!(fs::read_to_string(&path).unwrap().starts_with("digraph G {\n"));

    let eq_path = dir.path().join("eq.dot");
    let eq_arg = format!("-dot={}", eq_path.to_str().unwrap());
    let output = run(&[eq_arg.as_str(), "2*3"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "6\n");
    assert!(eq_path.exists());
}

#[test]
fn non_ascii_error_shows_source_line() {
    let output = run(&["1+é"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1+"), "source line missing from:\n{}", stderr);
    assert!(
        stderr.matches("Unexpected character").count() >= 2,
        "label missing from:\n{}",
        stderr
    );
}

#[test]
fn deeply_nested_input_fails_cleanly() {
    let source = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
    let output = run(&[source.as_str()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Expression nested too deeply"));
}
