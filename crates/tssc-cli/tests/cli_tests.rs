//! Integration tests that run the compiled `tssc` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tssc_test_utils::{ChartSpec, SAMPLE_CONFIG, TestInstaller};

/// Get a Command for the tssc binary
fn tssc_cmd() -> Command {
    Command::cargo_bin("tssc").expect("Failed to find tssc binary")
}

fn installer(dh_requires: &str) -> TestInstaller {
    TestInstaller::new().with_config(SAMPLE_CONFIG).with_charts(&[
        ChartSpec::new("tssc-openshift"),
        ChartSpec::new("tssc-acs")
            .product("Advanced Cluster Security")
            .depends_on(&["tssc-openshift"])
            .use_product_namespace()
            .provides(&["acs"]),
        ChartSpec::new("tssc-dh")
            .product("Developer Hub")
            .depends_on(&["tssc-openshift", "tssc-acs"])
            .requires(dh_requires),
    ])
}

fn topology_cmd(installer: &TestInstaller) -> Command {
    let mut cmd = tssc_cmd();
    cmd.env_remove("RUST_LOG")
        .arg("topology")
        .arg("--config")
        .arg(installer.config_path())
        .arg("--charts")
        .arg(installer.root());
    cmd
}

#[test]
fn test_help_exits_zero() {
    tssc_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("topology"))
        .stdout(predicate::str::contains("integrations"));
}

#[test]
fn test_integrations_lists_catalog() {
    tssc_cmd()
        .arg("integrations")
        .assert()
        .success()
        .stdout(predicate::str::contains("github"))
        .stdout(predicate::str::contains("trustification"));
}

#[test]
fn test_integrations_json() {
    let output = tssc_cmd()
        .args(["integrations", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(names.contains(&"quay".to_string()));
}

#[test]
fn test_topology_prints_plan() {
    let installer = installer("acs");
    topology_cmd(&installer)
        .assert()
        .success()
        .stdout(predicate::str::contains("Installation Topology"))
        .stdout(predicate::str::contains("tssc-openshift"))
        .stdout(predicate::str::contains("tssc-acs"))
        .stdout(predicate::str::contains("Developer Hub"));
}

#[test]
fn test_topology_json_order() {
    let installer = installer("acs");
    let output = topology_cmd(&installer).arg("--json").output().unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = plan
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    pretty_assertions::assert_eq!(names, vec!["tssc-openshift", "tssc-acs", "tssc-dh"]);
}

#[test]
fn test_missing_integrations_fail_with_hint() {
    let installer = installer("acs && github");
    topology_cmd(&installer)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing integrations"))
        .stderr(predicate::str::contains("github"))
        .stderr(predicate::str::contains("hint"));
}

#[test]
fn test_configured_integration_satisfies_requirement() {
    let installer = installer("acs && github");
    topology_cmd(&installer)
        .arg("--configured")
        .arg("github")
        .assert()
        .success();
}

#[test]
fn test_auto_disable_skips_superseded_product() {
    let installer = installer("acs");
    topology_cmd(&installer)
        .args(["--configured", "acs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already configured"));

    // tssc-dh still depends on tssc-acs, whose product is now disabled.
    topology_cmd(&installer)
        .args(["--configured", "acs", "--auto-disable"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is disabled"));
}

#[test]
fn test_unknown_configured_integration() {
    let installer = installer("acs");
    topology_cmd(&installer)
        .args(["--configured", "konflux"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("konflux"));
}

#[test]
fn test_missing_config_file() {
    let installer = TestInstaller::new();
    topology_cmd(&installer)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
