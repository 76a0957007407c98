use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command isolated from user configuration and HS_* variables.
fn hs_resources(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hs-resources").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("HS_REQUESTS_CPU")
        .env_remove("HS_REQUESTS_MEMORY")
        .env_remove("HS_LIMITS_CPU")
        .env_remove("HS_LIMITS_MEMORY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_resolve_flags_json() {
    let home = TempDir::new().unwrap();
    let output = hs_resources(&home)
        .args([
            "resolve",
            "--requests-cpu",
            "100m",
            "--requests-memory",
            "128Mi",
            "--limits-cpu",
            "200m",
            "--limits-memory",
            "256Mi",
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["resources"]["requestsCpu"], 100);
    assert_eq!(json["resources"]["requestsMemory"], 134_217_728);
    assert_eq!(json["resources"]["limitsCpu"], 200);
    assert_eq!(json["resources"]["limitsMemory"], 268_435_456);
    assert_eq!(json["usedDefaults"], false);
}

#[test]
fn test_resolve_manifest_with_override() {
    let home = TempDir::new().unwrap();
    let manifest = home.path().join("healthservice.yaml");
    fs::write(
        &manifest,
        r#"
apiVersion: operator.ibm.com/v1alpha1
kind: HealthService
spec:
  resources:
    requests:
      cpu: 100m
      memory: 128Mi
    limits:
      cpu: 200m
      memory: 256Mi
"#,
    )
    .unwrap();

    hs_resources(&home)
        .args(["resolve", "--file"])
        .arg(&manifest)
        .args(["--limits-cpu", "1000m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("128Mi"))
        .stdout(predicate::str::contains("1000 millicores"));
}

#[test]
fn test_resolve_falls_back_with_warning() {
    let home = TempDir::new().unwrap();
    hs_resources(&home)
        .args(["resolve", "--requests-cpu", "50", "--requests-memory", "abc"])
        .args(["--limits-cpu", "1", "--limits-memory", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Using default resources"))
        .stdout(predicate::str::contains("requests.memory"))
        .stdout(predicate::str::contains("512Mi"))
        .stderr(predicate::str::contains("WARN"));
}

#[test]
fn test_strict_resolve_fails() {
    let home = TempDir::new().unwrap();
    hs_resources(&home)
        .args(["resolve", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requests.cpu"));
}

#[test]
fn test_strict_from_local_config() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join(".healthservice.toml"), "[resolve]\nstrict = true\n").unwrap();

    hs_resources(&home)
        .args(["resolve", "--requests-cpu", "1", "--requests-memory", "1"])
        .args(["--limits-cpu", "1", "--limits-memory", "Mi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limits.memory"));
}

#[test]
fn test_defaults_command() {
    let home = TempDir::new().unwrap();
    hs_resources(&home)
        .args(["defaults", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"requestsCpu\": 50"))
        .stdout(predicate::str::contains("\"limitsMemory\": 536870912"));
}

#[test]
fn test_missing_config_file_is_error() {
    let home = TempDir::new().unwrap();
    hs_resources(&home)
        .args(["--config", "does-not-exist.toml", "defaults"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_manifest_scalars_resolve_as_written() {
    let home = TempDir::new().unwrap();
    let manifest = home.path().join("resources.yaml");
    fs::write(
        &manifest,
        "requests:\n  cpu: 1e3\n  memory: 0x10\nlimits:\n  cpu: +5\n  memory: 1\n",
    )
    .unwrap();

    let output = hs_resources(&home)
        .args(["resolve", "--format", "json", "--file"])
        .arg(&manifest)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["input"]["requests"]["cpu"], "1e3");
    assert_eq!(json["input"]["requests"]["memory"], "0x10");
    assert_eq!(json["input"]["limits"]["cpu"], "+5");
    assert_eq!(json["usedDefaults"], true);
    assert_eq!(json["failedField"], "limits.cpu");
}
