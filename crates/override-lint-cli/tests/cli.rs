//! End-to-end tests for the `override-lint` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_override-lint"))
        .args(args)
        .current_dir(dir)
        .env("OVERRIDE_LINT_CONFIG_DIR", dir.join(".no-global"))
        .env_remove("OVERRIDE_LINT_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should run")
}

fn project() -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().expect("tempdir");
    fs::write(
        tmp.path().join("shapes.py"),
        "\
from typing import Protocol, override


class Shape(Protocol):
    def area(self) -> float: ...


class Square(Shape):
    @override
    def area(self) -> float:
        return 1.0

    def perimeter(self) -> float:
        return 4.0

    def scale(self, k: float) -> None:  # noqa: OVR100
        pass
",
    )
    .expect("write");
    tmp
}

#[test]
fn compact_output_and_failing_exit() {
    let tmp = project();
    let out = run(tmp.path(), &["check", "--format", "compact", "."]);

    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "shapes.py:13:5: OVR100 method must contain an override-marker decorator\n"
    );
}

#[test]
fn fail_on_threshold_from_project_config() {
    let tmp = project();
    fs::write(
        tmp.path().join("override-lint.toml"),
        "[rules.require-override]\nseverity = \"warning\"\n",
    )
    .expect("write");

    let out = run(tmp.path(), &["check", "--format", "compact"]);
    assert_eq!(out.status.code(), Some(0));

    let out = run(
        tmp.path(),
        &["check", "--format", "compact", "--fail-on", "warning"],
    );
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn json_output_is_parseable() {
    let tmp = project();
    let out = run(tmp.path(), &["check", "--format", "json"]);
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(stdout.contains("\"files_checked\": 1"));
    assert!(stdout.contains("\"code\": \"OVR100\""));
    assert!(stdout.contains("\"line\": 13"));
}

#[test]
fn list_rules_shows_code() {
    let tmp = project();
    let out = run(tmp.path(), &["list-rules"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("OVR100"));
    assert!(stdout.contains("require-override"));
}

#[test]
fn init_refuses_to_overwrite() {
    let tmp = project();
    assert!(run(tmp.path(), &["init"]).status.success());
    assert!(tmp.path().join("override-lint.toml").exists());
    assert!(!run(tmp.path(), &["init"]).status.success());
    assert!(run(tmp.path(), &["init", "--force"]).status.success());
}

#[test]
fn strict_aborts_on_unparsable_file() {
    let tmp = tempfile::TempDir::new().expect("tempdir");
    fs::write(tmp.path().join("ok.py"), "class A:\n    @staticmethod\n    def f(): ...\n")
        .expect("write");
    fs::write(tmp.path().join("broken.py"), "class Broken(:\n    pass\n").expect("write");

    let out = run(tmp.path(), &["check", "--format", "compact"]);
    assert_eq!(out.status.code(), Some(0));

    let out = run(tmp.path(), &["check", "--format", "compact", "--strict"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Parse error in"), "stderr: {stderr}");
    assert!(stderr.contains("broken.py"), "stderr: {stderr}");
}

#[test]
fn rules_filter_by_code_and_unknown_rule() {
    let tmp = project();

    let out = run(tmp.path(), &["check", "--format", "compact", "--rules", "OVR100"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("shapes.py:13:5: OVR100"));

    let out = run(tmp.path(), &["check", "--rules", "no-such-rule"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("No known rules"));
}

#[test]
fn exclude_pattern_skips_file() {
    let tmp = project();
    let out = run(
        tmp.path(),
        &["check", "--format", "compact", "--exclude", "**/shapes.py"],
    );
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
}
