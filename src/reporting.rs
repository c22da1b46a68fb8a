//! # Reporting Module / 报告模块
//!
//! This module renders and persists session reports. Every run writes two
//! artifacts at fixed names inside the results directory, replacing any
//! earlier ones: a JSON document for machines and an HTML page for people.
//! It also prints live progress and a colored summary to the console.
//!
//! 此模块负责生成并保存会话报告。每次运行都会在结果目录中以固定文件名
//! 写出两个文件并覆盖旧文件：供机器使用的 JSON 文档和供人阅读的 HTML 页面。
//! 它还会在控制台打印实时进度和彩色摘要。

pub mod console;
pub mod html;
pub mod json;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::core::models::Report;
use crate::infra::fs;

pub const JSON_REPORT_FILE: &str = "test-report.json";
pub const HTML_REPORT_FILE: &str = "test-report.html";

/// Where a session's reports were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub html: PathBuf,
}

impl ReportPaths {
    pub fn in_dir(results_dir: &Path) -> Self {
        Self {
            json: results_dir.join(JSON_REPORT_FILE),
            html: results_dir.join(HTML_REPORT_FILE),
        }
    }
}

/// Writes both report files into `results_dir`, creating it if needed.
///
/// # Errors
/// Fails if the directory cannot be created or either file cannot be
/// written. The commands that produced `report` are unaffected.
///
/// # 错误
/// 目录无法创建或任一文件无法写入时返回错误。
pub fn write_reports(report: &Report, results_dir: &Path) -> Result<ReportPaths> {
    fs::ensure_dir(results_dir)?;
    let paths = ReportPaths::in_dir(results_dir);

    fs::write_file(&paths.json, &json::render_json_report(report)?)?;
    fs::write_file(&paths.html, &html::render_html_report(report))?;

    tracing::info!(
        json = %paths.json.display(),
        html = %paths.html.display(),
        "reports written"
    );
    Ok(paths)
}
