use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn enforcer_cmd() -> Command {
    Command::cargo_bin("enforcer").unwrap()
}

const DIVERGING_GRAPH: &str = r#"{
  "group": "com.example",
  "artifact": "app",
  "version": "1.0",
  "children": [
    { "group": "org.x", "artifact": "x", "version": "1.0" },
    {
      "group": "org.b",
      "artifact": "b",
      "version": "1.0",
      "children": [
        { "group": "org.x", "artifact": "x", "version": "2.0", "constraint": "[2.0,)" }
      ]
    }
  ]
}"#;

const CONVERGENT_GRAPH: &str = r#"
group = "com.example"
artifact = "app"
version = "1.0"

[[children]]
group = "org.x"
artifact = "x"
version = "1.0"

[[children]]
group = "org.b"
artifact = "b"
version = "1.0"
scope = "test"

[[children.children]]
group = "org.x"
artifact = "x"
version = "1.0"
"#;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_check_passes_on_convergent_graph() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "graph.toml", CONVERGENT_GRAPH);
    write(tmp.path(), "Enforcer.toml", "[rules.dependency-convergence]\n");

    enforcer_cmd()
        .current_dir(tmp.path())
        .args(["check", "--graph", "graph.toml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Passed"))
        .stderr(predicate::str::contains("dependency-convergence"));
}

#[test]
fn test_check_fails_on_divergence() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "graph.json", DIVERGING_GRAPH);
    write(tmp.path(), "Enforcer.toml", "[rules.dependency-convergence]\n");

    enforcer_cmd()
        .current_dir(tmp.path())
        .args(["check", "--graph", "graph.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 rule(s) failed"))
        .stderr(predicate::str::contains("Failed"))
        .stderr(predicate::str::contains("dependency-convergence"));
}

#[test]
fn test_check_warn_level_reports_without_failing() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "graph.json", DIVERGING_GRAPH);
    write(
        tmp.path(),
        "rules.toml",
        "[rules.ban-dynamic-versions]\nlevel = \"warn\"\n",
    );

    enforcer_cmd()
        .current_dir(tmp.path())
        .args(["check", "--graph", "graph.json", "--config", "rules.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dependency org.x:x:2.0 via org.b:b:1.0 is referenced with a banned dynamic version [2.0,)",
        ))
        .stderr(predicate::str::contains("Warning"));
}

#[test]
fn test_check_fail_false_does_not_fail() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "graph.json", DIVERGING_GRAPH);
    write(
        tmp.path(),
        "Enforcer.toml",
        "fail = false\n\n[rules.require-upper-bound-deps]\n",
    );

    enforcer_cmd()
        .current_dir(tmp.path())
        .args(["check", "--graph", "graph.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Require upper bound dependencies error for org.x:x:1.0",
        ));
}

#[test]
fn test_check_without_rules_skips() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "graph.json", DIVERGING_GRAPH);

    enforcer_cmd()
        .current_dir(tmp.path())
        .args(["check", "--graph", "graph.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no rules configured"));
}

#[test]
fn test_check_missing_graph_fails() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "Enforcer.toml", "[rules.dependency-convergence]\n");

    enforcer_cmd()
        .current_dir(tmp.path())
        .args(["check", "--graph", "missing.json"])
        .assert()
        .failure();
}

#[test]
fn test_check_missing_explicit_config_fails() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "graph.json", DIVERGING_GRAPH);

    enforcer_cmd()
        .current_dir(tmp.path())
        .args(["check", "--graph", "graph.json", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.toml"));
}

#[test]
fn test_check_invalid_pattern_fails() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "graph.json", DIVERGING_GRAPH);
    write(
        tmp.path(),
        "Enforcer.toml",
        "[rules.banned-dependencies]\nexcludes = [\"org.x:x:[1.0\"]\n",
    );

    enforcer_cmd()
        .current_dir(tmp.path())
        .args(["check", "--graph", "graph.json"])
        .assert()
        .failure();
}
