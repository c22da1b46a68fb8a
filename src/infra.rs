//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the tier runner,
//! including child-process execution, file system operations, and logging.
//!
//! 此模块为分层运行器提供基础设施服务，
//! 包括子进程执行、文件系统操作和日志。

pub mod command;
pub mod fs;
pub mod logging;
