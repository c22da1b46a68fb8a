// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use tier_runner::cli::commands::run::RunOptions;
use tier_runner::core::planner::{ExecutionMode, TierSelector};

/// Creates an empty project directory for a session to run in.
pub fn setup_test_environment() -> TempDir {
    tempdir().expect("Failed to create temporary directory")
}

/// Writes `content` as `catalog.toml` inside `dir` and returns its path.
pub fn write_catalog(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("catalog.toml");
    fs::write(&path, content).expect("Failed to write catalog");
    path
}

/// A critical tier with two passing commands and one failing command.
pub const MIXED_CRITICAL_CATALOG: &str = r#"
results_dir = "results"

[[tiers]]
id = "critical"
workers = 3

[[tiers.commands]]
command = "echo frontend ok"
component = "frontend"
test_type = "unit"

[[tiers.commands]]
command = "echo backend ok"
component = "backend"
test_type = "unit"

[[tiers.commands]]
command = "echo boom >&2; exit 1"
component = "backend"
test_type = "integration"
"#;

/// Three tiers with passing commands only.
pub const PASSING_CATALOG: &str = r#"
results_dir = "results"

[[tiers]]
id = "critical"

[[tiers.commands]]
command = "echo one"
component = "frontend"
test_type = "unit"

[[tiers]]
id = "important"

[[tiers.commands]]
command = "echo two"
component = "backend"
test_type = "unit"

[[tiers.commands]]
command = "echo three"
component = "backend"
test_type = "integration"

[[tiers]]
id = "smoke"
parallel = false

[[tiers.commands]]
command = "echo four"
component = "system"
test_type = "health"
"#;

/// Options for a session in `project` with the catalog at `config`.
pub fn run_options(project: &Path, config: &Path, selector: TierSelector) -> RunOptions {
    RunOptions {
        selector,
        mode: ExecutionMode::Parallel,
        config: Some(config.to_path_buf()),
        project_dir: project.to_path_buf(),
        ..RunOptions::default()
    }
}
