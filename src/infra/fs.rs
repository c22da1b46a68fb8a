//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations: expanding
//! user-supplied paths, resolving them against the project root, and writing
//! report files into a directory that may not exist yet.
//!
//! 此模块提供文件系统操作的实用功能：展开用户提供的路径、
//! 将其解析到项目根目录下，以及向可能尚不存在的目录写入报告文件。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Expands `~` and `$VAR` / `${VAR}` references in a path.
///
/// # Arguments
/// * `path` - Path as written in the catalog or on the command line
///
/// # Returns
/// The expanded path, or an error naming the undefined variable
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path: {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Expands `path` and, if it is relative, joins it onto `base`.
pub fn resolve_path(base: &Path, path: &Path) -> Result<PathBuf> {
    let expanded = expand_path(path)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base.join(expanded))
    }
}

/// Gets the absolute path from a potentially relative path.
///
/// # Arguments
/// * `path` - Path to canonicalize
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}

/// Creates `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}

/// Writes `contents` to `path`, replacing any existing file.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write file: {}", path.display()))
}
