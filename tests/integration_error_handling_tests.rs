//! # Error Handling Integration Tests / 错误处理集成测试
//!
//! Sessions that hit failing commands, bad settings or an unwritable results
//! directory.
//!
//! 测试遇到失败命令、错误设置或无法写入结果目录时的会话行为。

mod common;

use common::{MIXED_CRITICAL_CATALOG, run_options, setup_test_environment, write_catalog};
use std::fs;
use tier_runner::cli::commands::run::{RunOptions, execute};
use tier_runner::core::planner::TierSelector;

#[tokio::test]
async fn test_failing_command_does_not_stop_the_session() {
    let project = setup_test_environment();
    let config = write_catalog(project.path(), MIXED_CRITICAL_CATALOG);

    let session = execute(run_options(project.path(), &config, TierSelector::Critical))
        .await
        .unwrap();

    assert_eq!(session.report.summary.total, 3);
    assert_eq!(session.report.summary.failed, 1);
    let failed = &session.report.test_results["backend_critical_integration"];
    assert_eq!(failed.exit_status, 1);
    assert_eq!(failed.stderr.trim(), "boom");
}

#[tokio::test]
async fn test_missing_results_dir_is_created() {
    let project = setup_test_environment();
    let config = write_catalog(project.path(), MIXED_CRITICAL_CATALOG);
    let results = project.path().join("deep").join("results");

    let session = execute(RunOptions {
        results_dir: Some(results.clone()),
        ..run_options(project.path(), &config, TierSelector::Critical)
    })
    .await
    .unwrap();

    assert!(results.is_dir());
    assert!(session.paths.json.is_file());
    assert!(session.paths.html.is_file());
}

#[tokio::test]
async fn test_results_dir_that_is_a_file_is_an_error() {
    let project = setup_test_environment();
    let config = write_catalog(project.path(), MIXED_CRITICAL_CATALOG);
    let blocker = project.path().join("blocked");
    fs::write(&blocker, "not a directory").unwrap();

    let result = execute(RunOptions {
        results_dir: Some(blocker),
        ..run_options(project.path(), &config, TierSelector::Critical)
    })
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_invalid_catalog_is_an_error() {
    let project = setup_test_environment();
    let config = write_catalog(project.path(), "[[tiers]\nid = \"critical\"");

    let result = execute(run_options(project.path(), &config, TierSelector::Critical)).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_missing_project_dir_is_an_error() {
    let project = setup_test_environment();
    let config = write_catalog(project.path(), MIXED_CRITICAL_CATALOG);

    let result = execute(run_options(
        &project.path().join("nowhere"),
        &config,
        TierSelector::Critical,
    ))
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_out_of_range_threshold_is_an_error() {
    let project = setup_test_environment();
    let config = write_catalog(project.path(), MIXED_CRITICAL_CATALOG);

    let result = execute(RunOptions {
        threshold: Some(150.0),
        ..run_options(project.path(), &config, TierSelector::Critical)
    })
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_undeclared_tier_yields_an_empty_failing_report() {
    let project = setup_test_environment();
    let config = write_catalog(project.path(), MIXED_CRITICAL_CATALOG);

    let session = execute(run_options(project.path(), &config, TierSelector::Security))
        .await
        .unwrap();

    assert_eq!(session.report.summary.total, 0);
    assert_eq!(session.report.summary.success_rate, 0.0);
    assert!(!session.report.threshold_met());
    assert!(session.paths.json.is_file());
}
