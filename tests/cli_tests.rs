use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const PASSING: &str = r#"
results_dir = "out"

[[tiers]]
id = "critical"

[[tiers.commands]]
command = "echo alpha"
component = "frontend"
test_type = "unit"

[[tiers.commands]]
command = "echo beta"
component = "backend"
test_type = "unit"
"#;

const HALF_FAILING: &str = r#"
results_dir = "out"

[[tiers]]
id = "critical"

[[tiers.commands]]
command = "echo alpha"
component = "frontend"
test_type = "unit"

[[tiers.commands]]
command = "echo nope >&2; exit 4"
component = "backend"
test_type = "unit"
"#;

/// A session where every command passes exits with code 0 and writes both
/// reports into the catalog's results directory.
///
/// 所有命令都通过的会话以退出码 0 结束，并在目录配置的结果目录中写出两份报告。
#[test]
fn test_successful_run() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("catalog.toml");
    fs::write(&config, PASSING).unwrap();

    let mut cmd = Command::cargo_bin("tier-runner").unwrap();
    cmd.arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--project-dir")
        .arg(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("CRITICAL TESTS"))
        .stdout(predicate::str::contains("100.0%"));

    assert!(dir.path().join("out/test-report.json").is_file());
    assert!(dir.path().join("out/test-report.html").is_file());
}

/// A 50% session misses the default 80% bar and exits non-zero, but a lower
/// `--threshold` lets it pass.
///
/// 成功率 50% 的会话达不到默认的 80%，以非零退出码结束；降低 `--threshold` 后则通过。
#[test]
fn test_threshold_controls_exit_code() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("catalog.toml");
    fs::write(&config, HALF_FAILING).unwrap();

    Command::cargo_bin("tier-runner")
        .unwrap()
        .args(["run", "--sequential", "--config"])
        .arg(&config)
        .arg("--project-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("nope"));

    Command::cargo_bin("tier-runner")
        .unwrap()
        .args(["run", "--threshold", "50", "--config"])
        .arg(&config)
        .arg("--project-dir")
        .arg(dir.path())
        .assert()
        .success();
}

/// An unknown tier is rejected by argument parsing before anything runs.
///
/// 未知层级在任何命令运行前即被参数解析拒绝。
#[test]
fn test_invalid_tier_is_rejected() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("tier-runner")
        .unwrap()
        .args(["run", "--tier", "nightly", "--project-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("nightly"));

    assert!(!dir.path().join("test-results").exists());
}

/// A malformed catalog is reported on stderr with a non-zero exit code.
///
/// 格式错误的目录会在 stderr 上报告，并以非零退出码结束。
#[test]
fn test_invalid_catalog_is_reported() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("catalog.toml");
    fs::write(&config, "[[tiers]]\nid = \"regression\"").unwrap();

    Command::cargo_bin("tier-runner")
        .unwrap()
        .args(["run", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("regression"));
}

/// `init` writes a catalog that `run --config` accepts, and refuses to
/// overwrite it without a prompt.
///
/// `init` 写出的目录可被 `run --config` 接受，且在非交互模式下拒绝覆盖。
#[test]
fn test_init_writes_default_catalog() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("TierCatalog.toml");

    Command::cargo_bin("tier-runner")
        .unwrap()
        .args(["init", "--non-interactive", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote the default tier catalog"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("[[tiers]]"));
    assert!(content.contains("success_threshold"));

    Command::cargo_bin("tier-runner")
        .unwrap()
        .args(["init", "--non-interactive", "--output"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("tier-runner")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("init"));
}
