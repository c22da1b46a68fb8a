//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command: it resolves the catalog and
//! session settings, runs the selected tiers in order, then aggregates,
//! writes and prints the session report.
//!
//! 此模块实现 `run` 命令：解析目录和会话设置，按顺序运行所选层级，
//! 然后汇总、写出并打印会话报告。

use anyhow::{Context, Result, bail};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::core::aggregate;
use crate::core::config::TierCatalog;
use crate::core::execution::{ExecutionSettings, run_tier};
use crate::core::models::Report;
use crate::core::planner::{self, ExecutionMode, TierSelector};
use crate::core::store::ResultsStore;
use crate::infra::fs;
use crate::reporting::{self, ReportPaths, console};

/// Options for one `run` session, as given on the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub selector: TierSelector,
    pub mode: ExecutionMode,
    /// Catalog file; the built-in catalog is used when `None`.
    pub config: Option<PathBuf>,
    pub project_dir: PathBuf,
    /// Overrides the catalog's `results_dir`.
    pub results_dir: Option<PathBuf>,
    /// Overrides the catalog's `timeout_secs`.
    pub timeout_secs: Option<u64>,
    pub jobs: Option<usize>,
    /// Overrides the catalog's `success_threshold`.
    pub threshold: Option<f64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            selector: TierSelector::default(),
            mode: ExecutionMode::default(),
            config: None,
            project_dir: PathBuf::from("."),
            results_dir: None,
            timeout_secs: None,
            jobs: None,
            threshold: None,
        }
    }
}

/// A finished session: the aggregated report and where it was written.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub report: Report,
    pub paths: ReportPaths,
}

/// Runs one session end to end.
///
/// Command failures are recorded in the report and never returned as
/// errors. Errors are reserved for an unusable catalog or settings, and for
/// reports that could not be written.
///
/// 端到端运行一次会话。命令失败会记录在报告中，不会作为错误返回。
///
/// # Arguments
/// * `options` - Session options from the command line
///
/// # Returns
/// The session report and the report file paths
pub async fn execute(options: RunOptions) -> Result<SessionOutcome> {
    let catalog = load_catalog(options.config.as_deref())?;

    let project_root = fs::absolute_path(&fs::expand_path(&options.project_dir)?)
        .context("Project directory is not accessible")?;
    let results_dir = fs::resolve_path(
        &project_root,
        options.results_dir.as_deref().unwrap_or(&catalog.results_dir),
    )?;

    let threshold = options.threshold.unwrap_or(catalog.success_threshold);
    if !(0.0..=100.0).contains(&threshold) {
        bail!("Success threshold must be between 0 and 100, got {threshold}");
    }
    if options.timeout_secs == Some(0) {
        bail!("--timeout must be greater than zero");
    }
    let timeout = options
        .timeout_secs
        .or(catalog.timeout_secs)
        .map(Duration::from_secs);

    let plan = planner::plan_execution(&catalog, options.selector, options.mode, options.jobs);
    tracing::debug!(
        tiers = plan.tiers.len(),
        commands = plan.command_count(),
        mode = ?plan.mode,
        "execution plan ready"
    );
    console::print_session_banner(&plan);

    let settings = ExecutionSettings::new(project_root).with_timeout(timeout);
    let store = ResultsStore::new();
    let session_start = Instant::now();

    for tier_plan in &plan.tiers {
        console::print_tier_banner(tier_plan);
        let elapsed = run_tier(tier_plan, &settings, &store).await;
        tracing::debug!(tier = %tier_plan.tier, ?elapsed, "tier finished");
    }

    let report = aggregate::build_report(
        store.snapshot(),
        session_start.elapsed(),
        threshold,
        Local::now(),
    );
    let paths = reporting::write_reports(&report, &results_dir)
        .context("Failed to write test reports")?;

    console::print_summary(&report, &paths);
    Ok(SessionOutcome { report, paths })
}

fn load_catalog(path: Option<&Path>) -> Result<TierCatalog> {
    match path {
        Some(path) => TierCatalog::load(&fs::expand_path(path)?),
        None => TierCatalog::builtin(),
    }
}
