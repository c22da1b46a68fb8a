//! # Execution Planner Module / 执行计划模块
//!
//! This module resolves a tier selector against the catalog into an ordered
//! list of tier plans, each carrying its descriptors, worker bound and
//! effective execution mode.
//!
//! 此模块根据目录将层级选择器解析为有序的层级执行计划，
//! 每个计划包含其描述符、工作线程上限和实际执行模式。

use clap::ValueEnum;

use crate::core::config::TierCatalog;
use crate::core::models::{CommandDescriptor, Tier};

/// The tier selector accepted on the command line.
/// 命令行接受的层级选择器。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TierSelector {
    #[default]
    #[value(alias = "1")]
    Critical,
    #[value(alias = "2")]
    Important,
    #[value(alias = "3")]
    Secondary,
    Smoke,
    Regression,
    Performance,
    Security,
    /// Every tier, including the regression pseudo-tier.
    All,
}

impl TierSelector {
    /// Expands the selector to the tiers it runs, in execution order.
    pub fn tiers(self) -> Vec<Tier> {
        match self {
            TierSelector::Critical => vec![Tier::Critical],
            TierSelector::Important => vec![Tier::Important],
            TierSelector::Secondary => vec![Tier::Secondary],
            TierSelector::Smoke => vec![Tier::Smoke],
            TierSelector::Regression => vec![Tier::Regression],
            TierSelector::Performance => vec![Tier::Performance],
            TierSelector::Security => vec![Tier::Security],
            TierSelector::All => Tier::ALL.to_vec(),
        }
    }
}

/// Whether a session dispatches tier commands to a worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Parallel,
    Sequential,
}

impl ExecutionMode {
    /// Resolves the `--sequential` flag. Parallel is the default, so
    /// `--parallel` only restates it and sequential wins when both are given.
    pub fn from_sequential_flag(sequential: bool) -> Self {
        if sequential {
            ExecutionMode::Sequential
        } else {
            ExecutionMode::Parallel
        }
    }
}

/// Everything needed to run one tier.
#[derive(Debug, Clone)]
pub struct TierPlan {
    pub tier: Tier,
    pub descriptors: Vec<CommandDescriptor>,
    /// Worker bound used when `parallel` is set.
    pub workers: usize,
    pub parallel: bool,
}

/// Represents a complete execution plan for a session.
/// 表示一次会话的完整执行计划。
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub tiers: Vec<TierPlan>,
    pub mode: ExecutionMode,
}

impl ExecutionPlan {
    /// Number of command executions the plan will perform.
    pub fn command_count(&self) -> usize {
        self.tiers.iter().map(|plan| plan.descriptors.len()).sum()
    }
}

/// Creates an execution plan for the selected tiers.
///
/// `jobs`, when given, caps every tier's worker bound. A tier runs in parallel
/// only if the session is parallel, the catalog allows it, and more than one
/// worker is available.
///
/// 为所选层级创建执行计划。
pub fn plan_execution(
    catalog: &TierCatalog,
    selector: TierSelector,
    mode: ExecutionMode,
    jobs: Option<usize>,
) -> ExecutionPlan {
    let tiers = selector
        .tiers()
        .into_iter()
        .map(|tier| {
            let mut workers = catalog.workers(tier);
            if let Some(jobs) = jobs {
                workers = workers.min(jobs.max(1));
            }
            let parallel =
                mode == ExecutionMode::Parallel && catalog.allows_parallel(tier) && workers > 1;
            TierPlan {
                tier,
                descriptors: catalog.descriptors(tier),
                workers,
                parallel,
            }
        })
        .collect();

    ExecutionPlan { tiers, mode }
}
