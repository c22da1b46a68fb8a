//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the tier runner:
//! data models, the tier catalog, planning, execution, the shared results
//! store and report aggregation.
//!
//! 此模块包含分层运行器的核心功能：
//! 数据模型、层级目录、执行计划、执行、共享结果存储和报告汇总。

pub mod aggregate;
pub mod config;
pub mod execution;
pub mod models;
pub mod planner;
pub mod store;

// Re-exports
pub use config::TierCatalog;
pub use execution::{run_command, run_tier};
pub use models::{CommandDescriptor, Outcome, Report, Tier};
pub use store::ResultsStore;
