//! # JSON Reporting Module / JSON 报告模块
//!
//! Serializes a [`Report`] into the machine-readable document:
//! `{timestamp, threshold, summary, tier_metrics, test_results}`.
//!
//! 将 [`Report`] 序列化为机器可读的文档。

use anyhow::{Context, Result};

use crate::core::models::Report;

/// Renders `report` as pretty-printed JSON, captured output included.
pub fn render_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize the JSON report")
}

/// Parses a report previously written by [`render_json_report`].
pub fn parse_json_report(content: &str) -> Result<Report> {
    serde_json::from_str(content).context("Failed to parse the JSON report")
}
