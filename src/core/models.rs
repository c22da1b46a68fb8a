//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the tier runner.
//! It includes tier identifiers, command descriptors, per-command outcomes,
//! failure reasons, and the aggregate report written at the end of a session.
//!
//! 此模块定义了整个分层运行器中使用的核心数据结构。
//! 它包括层级标识、命令描述符、单条命令的执行结果、失败原因以及会话结束时写出的汇总报告。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Exit status recorded for commands that never produced a real one
/// (launch failures, timeouts, panicked workers).
/// 对于从未产生真实退出码的命令（启动失败、超时、工作任务崩溃）记录的退出码。
pub const FAULT_EXIT_STATUS: i32 = 1;

/// A named priority bucket of test commands run together under one cadence.
/// 在同一节奏下一起运行的具名优先级测试命令组。
///
/// The declaration order is the order tiers run in when `all` is requested,
/// and the order they are listed in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Run on every change.
    Critical,
    /// Run on schema changes.
    Important,
    /// Run weekly.
    Secondary,
    /// Fast validation subset.
    Smoke,
    Performance,
    Security,
    /// Pseudo-tier: critical + important + secondary, relabeled.
    Regression,
}

impl Tier {
    /// Every tier, in execution order.
    pub const ALL: [Tier; 7] = [
        Tier::Critical,
        Tier::Important,
        Tier::Secondary,
        Tier::Smoke,
        Tier::Performance,
        Tier::Security,
        Tier::Regression,
    ];

    /// The tiers whose commands make up the regression pseudo-tier.
    pub const REGRESSION_SOURCES: [Tier; 3] = [Tier::Critical, Tier::Important, Tier::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Critical => "critical",
            Tier::Important => "important",
            Tier::Secondary => "secondary",
            Tier::Smoke => "smoke",
            Tier::Performance => "performance",
            Tier::Security => "security",
            Tier::Regression => "regression",
        }
    }

    /// A short description of when this tier is meant to run.
    /// 描述该层级应在何时运行的简短说明。
    pub fn cadence(&self) -> &'static str {
        match self {
            Tier::Critical => "Every Change",
            Tier::Important => "Schema Changes",
            Tier::Secondary => "Weekly",
            Tier::Smoke => "Quick Validation",
            Tier::Performance => "Load & Stress",
            Tier::Security => "Security Suite",
            Tier::Regression => "Full Regression Suite",
        }
    }

    /// `true` for the regression pseudo-tier, which a catalog may never declare.
    pub fn is_derived(&self) -> bool {
        matches!(self, Tier::Regression)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tier '{0}' (expected one of critical, important, secondary, smoke, performance, security, regression)")]
pub struct UnknownTier(pub String);

impl FromStr for Tier {
    type Err = UnknownTier;

    /// Parses a tier name case-insensitively. The numeric aliases `1`, `2`
    /// and `3` map to critical, important and secondary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" | "1" => Ok(Tier::Critical),
            "important" | "2" => Ok(Tier::Important),
            "secondary" | "3" => Ok(Tier::Secondary),
            "smoke" => Ok(Tier::Smoke),
            "performance" => Ok(Tier::Performance),
            "security" => Ok(Tier::Security),
            "regression" => Ok(Tier::Regression),
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}

/// Builds the key under which an outcome is stored: `component_tier_testtype`.
/// Two executions with the same key replace each other (last write wins).
/// 构建存储执行结果所用的键：`component_tier_testtype`。
pub fn outcome_key(component: &str, tier: Tier, test_type: &str) -> String {
    format!("{component}_{tier}_{test_type}")
}

/// The static definition of one command to run, independent of its result.
/// 单条待执行命令的静态定义，与其执行结果无关。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// A shell-invocable instruction string.
    pub command: String,
    /// Label of the component under test (e.g. "frontend", "backend").
    pub component: String,
    /// The tier this descriptor is executed under.
    pub tier: Tier,
    /// Label of the kind of test (e.g. "e2e", "unit", "load").
    pub test_type: String,
    /// Optional working directory, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workdir: Option<PathBuf>,
}

impl CommandDescriptor {
    pub fn new(
        command: impl Into<String>,
        component: impl Into<String>,
        tier: Tier,
        test_type: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            component: component.into(),
            tier,
            test_type: test_type.into(),
            workdir: None,
        }
    }

    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    /// Returns a copy of this descriptor filed under another tier label.
    /// Used to build the regression pseudo-tier.
    pub fn relabeled(&self, tier: Tier) -> Self {
        Self {
            tier,
            ..self.clone()
        }
    }

    pub fn key(&self) -> String {
        outcome_key(&self.component, self.tier, &self.test_type)
    }
}

/// Why a command did not succeed.
/// 命令未成功的原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The process ran and exited with a non-zero status.
    /// 进程已运行并以非零状态退出。
    ExitCode,
    /// The process exceeded its timeout and was killed.
    /// 进程超出超时时间并被终止。
    Timeout,
    /// The process could not be started (bad working directory, missing shell, ...).
    /// 进程无法启动（工作目录错误、缺少 shell 等）。
    Launch,
    /// The worker executing the command panicked before recording a result.
    /// 执行命令的工作任务在记录结果之前崩溃。
    Panicked,
}

impl FailureReason {
    pub fn label(&self) -> &'static str {
        match self {
            FailureReason::ExitCode => "Exit Code",
            FailureReason::Timeout => "Timeout",
            FailureReason::Launch => "Launch Error",
            FailureReason::Panicked => "Worker Panic",
        }
    }
}

/// The recorded result of executing one descriptor once.
/// 单个描述符执行一次后记录的结果。
///
/// Build outcomes with [`Outcome::completed`] or [`Outcome::fault`], which keep
/// `success` equal to `exit_status == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub component: String,
    pub tier: Tier,
    pub test_type: String,
    /// Wall-clock seconds from just before launch until the process finished
    /// or was abandoned.
    #[serde(with = "duration_secs")]
    pub duration: Duration,
    pub exit_status: i32,
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
    pub timestamp: DateTime<Local>,
}

impl Outcome {
    /// Records a process that ran to completion. Any non-zero status is a
    /// tool-reported failure and is preserved verbatim.
    pub fn completed(
        descriptor: &CommandDescriptor,
        exit_status: i32,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        let success = exit_status == 0;
        Self {
            component: descriptor.component.clone(),
            tier: descriptor.tier,
            test_type: descriptor.test_type.clone(),
            duration,
            exit_status,
            stdout,
            stderr,
            success,
            failure: (!success).then_some(FailureReason::ExitCode),
            timestamp: Local::now(),
        }
    }

    /// Records a local fault: the command never produced an exit status of
    /// its own. The fault description is carried in `stderr`.
    pub fn fault(
        descriptor: &CommandDescriptor,
        reason: FailureReason,
        message: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            component: descriptor.component.clone(),
            tier: descriptor.tier,
            test_type: descriptor.test_type.clone(),
            duration,
            exit_status: FAULT_EXIT_STATUS,
            stdout: String::new(),
            stderr: message.into(),
            success: false,
            failure: Some(reason),
            timestamp: Local::now(),
        }
    }

    pub fn key(&self) -> String {
        outcome_key(&self.component, self.tier, &self.test_type)
    }

    pub fn is_timeout(&self) -> bool {
        self.failure == Some(FailureReason::Timeout)
    }

    /// Gets the status of the outcome as a string for display.
    /// 以字符串形式获取结果状态以供显示。
    pub fn status_str(&self) -> &'static str {
        if self.success { "PASSED" } else { "FAILED" }
    }

    /// CSS class used by the HTML report.
    pub fn status_class(&self) -> &'static str {
        if self.success { "passed" } else { "failed" }
    }
}

/// Summary numbers for one tier, recomputed for every report.
/// 单个层级的汇总数据，每次生成报告时重新计算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierMetrics {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage in `[0, 100]`.
    pub success_rate: f64,
    #[serde(with = "duration_secs")]
    pub avg_duration: Duration,
}

/// Session-wide summary numbers.
/// 整个会话的汇总数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Percentage in `[0, 100]`; 0 when nothing ran.
    pub success_rate: f64,
    #[serde(with = "duration_secs")]
    pub total_time: Duration,
}

/// The persisted aggregate of a session's outcomes plus summary metrics.
/// 持久化的会话结果汇总及统计指标。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub timestamp: DateTime<Local>,
    /// Success-rate bar (percent) the session is judged against.
    pub threshold: f64,
    pub summary: Summary,
    pub tier_metrics: BTreeMap<Tier, TierMetrics>,
    pub test_results: BTreeMap<String, Outcome>,
}

impl Report {
    /// `true` when the overall success rate cleared the threshold.
    pub fn threshold_met(&self) -> bool {
        self.summary.success_rate >= self.threshold
    }

    /// Outcomes filed under `tier`, in key order.
    pub fn outcomes_for(&self, tier: Tier) -> impl Iterator<Item = &Outcome> {
        self.test_results.values().filter(move |o| o.tier == tier)
    }
}

/// Serializes a [`Duration`] as fractional seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(de::Error::custom)
    }
}
