//! # Tier Runner Library / Tier Runner 库
//!
//! This library runs a project's test commands (unit, integration, e2e,
//! performance, security...) grouped into priority tiers, captures each
//! command's output and exit status, and aggregates everything into JSON
//! and HTML session reports.
//!
//! 此库按优先级层级运行项目的测试命令（单元、集成、端到端、性能、安全……），
//! 捕获每条命令的输出和退出状态，并汇总为 JSON 和 HTML 会话报告。
//!
//! ## Modules / 模块
//!
//! - `core` - Tier catalog, planning, execution engine and aggregation
//! - `infra` - Process spawning, file system helpers and logging setup
//! - `reporting` - Console progress and JSON/HTML report rendering
//! - `cli` - Command-line interface and the `run`/`init` commands
//!
//! - `core` - 层级目录、执行计划、执行引擎和汇总
//! - `infra` - 进程启动、文件系统辅助函数和日志设置
//! - `reporting` - 控制台进度以及 JSON/HTML 报告生成
//! - `cli` - 命令行接口以及 `run`/`init` 命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::execution;
pub use core::models;
