//! # Execution Engine Module / 执行引擎模块
//!
//! This module runs descriptors. [`run_command`] executes a single command and
//! always returns an [`Outcome`], converting launch failures and timeouts into
//! failed outcomes. [`run_tier`] runs every descriptor of a tier, either in
//! list order or on a bounded worker pool, and records each outcome in the
//! shared [`ResultsStore`].
//!
//! 此模块负责执行描述符。[`run_command`] 执行单条命令并总是返回一个 [`Outcome`]，
//! 将启动失败和超时转换为失败结果。[`run_tier`] 按列表顺序或在有界工作池中
//! 运行层级的所有描述符，并把每个结果记录到共享的 [`ResultsStore`] 中。

use futures::{StreamExt, stream};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{
    core::{
        models::{CommandDescriptor, FailureReason, Outcome},
        planner::TierPlan,
        store::ResultsStore,
    },
    infra::command::{self, CaptureError},
    reporting::console,
};

/// Settings shared by every command of a session.
#[derive(Debug, Clone)]
pub struct ExecutionSettings {
    /// Directory commands run from, unless a descriptor names its own.
    pub project_root: PathBuf,
    /// Upper bound on a single command's run time.
    pub timeout: Option<Duration>,
}

impl ExecutionSettings {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The directory `descriptor` runs in.
    pub fn workdir_for(&self, descriptor: &CommandDescriptor) -> PathBuf {
        match &descriptor.workdir {
            Some(dir) => self.project_root.join(dir),
            None => self.project_root.clone(),
        }
    }
}

/// Executes one descriptor and returns its outcome. Never fails: every fault
/// is folded into the returned [`Outcome`].
///
/// # Arguments
/// * `descriptor` - The command to run
/// * `settings` - Project root and timeout
///
/// # Returns
/// An `Outcome` whose duration spans launch to termination (or abandonment)
pub async fn run_command(descriptor: &CommandDescriptor, settings: &ExecutionSettings) -> Outcome {
    console::print_command_started(descriptor);

    let workdir = settings.workdir_for(descriptor);
    let outcome = execute(descriptor, &workdir, settings.timeout).await;

    console::print_outcome(&outcome);
    outcome
}

async fn execute(
    descriptor: &CommandDescriptor,
    workdir: &Path,
    timeout: Option<Duration>,
) -> Outcome {
    let mut cmd = command::shell_command(&descriptor.command);
    cmd.current_dir(workdir);

    tracing::debug!(
        key = %descriptor.key(),
        command = %descriptor.command,
        workdir = %workdir.display(),
        "spawning command"
    );

    let start = Instant::now();
    let result = command::spawn_and_capture(cmd, timeout).await;
    let duration = start.elapsed();

    match result {
        Ok(captured) => {
            let status = command::exit_code(&captured.status);
            tracing::debug!(key = %descriptor.key(), status, ?duration, "command exited");
            Outcome::completed(descriptor, status, captured.stdout, captured.stderr, duration)
        }
        Err(e @ CaptureError::TimedOut(_)) => {
            tracing::debug!(key = %descriptor.key(), ?duration, "command timed out");
            Outcome::fault(descriptor, FailureReason::Timeout, e.to_string(), duration)
        }
        Err(e) => {
            tracing::debug!(key = %descriptor.key(), error = %e, "command could not run");
            let message = format!("{e} (working directory: {})", workdir.display());
            Outcome::fault(descriptor, FailureReason::Launch, message, duration)
        }
    }
}

/// Runs every descriptor of a tier and records one outcome per descriptor.
///
/// Sequential plans run strictly in list order. Parallel plans dispatch every
/// descriptor to a pool of `plan.workers` tasks and return only once all of
/// them have reported. A failing command never stops the others.
///
/// 运行层级中的每个描述符，并为每个描述符记录一个结果。
/// 顺序计划严格按列表顺序执行；并行计划将所有描述符分派到
/// `plan.workers` 个任务的工作池中，并在全部完成后才返回。
///
/// # Returns
/// The wall-clock time the tier took
pub async fn run_tier(
    plan: &TierPlan,
    settings: &ExecutionSettings,
    store: &ResultsStore,
) -> Duration {
    let start = Instant::now();

    if !plan.parallel {
        for descriptor in &plan.descriptors {
            store.insert(run_command(descriptor, settings).await);
        }
        return start.elapsed();
    }

    let settings = Arc::new(settings.clone());
    stream::iter(plan.descriptors.iter().cloned().map(|descriptor| {
        let settings = Arc::clone(&settings);
        let store = store.clone();

        async move {
            let dispatched = Instant::now();
            let task_descriptor = descriptor.clone();
            let task_store = store.clone();
            let handle = tokio::spawn(async move {
                let outcome = run_command(&task_descriptor, &settings).await;
                task_store.insert(outcome);
            });

            if let Err(e) = handle.await {
                let outcome = Outcome::fault(
                    &descriptor,
                    FailureReason::Panicked,
                    format!("worker failed before recording a result: {e}"),
                    dispatched.elapsed(),
                );
                console::print_outcome(&outcome);
                store.insert(outcome);
            }
        }
    }))
    .buffer_unordered(plan.workers.max(1))
    .collect::<Vec<()>>()
    .await;

    start.elapsed()
}
