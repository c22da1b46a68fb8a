//! # HTML Reporting Module / HTML 报告模块
//!
//! This module renders the human-readable report: summary cards, a section
//! per tier with its counts, and every outcome with collapsible output.
//!
//! 此模块生成人类可读的报告：摘要卡片、每个层级的统计区块，
//! 以及每个执行结果及其可折叠的输出。

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::core::aggregate::round_rate;
use crate::core::models::{Outcome, Report, Tier, TierMetrics};

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Generates the HTML report for `report`.
/// Captured output is escaped by the template engine.
///
/// 为 `report` 生成 HTML 报告。捕获的输出由模板引擎转义。
pub fn render_html_report(report: &Report) -> String {
    let summary = &report.summary;

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Tier Runner Test Report" }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                div.container {
                    div.header {
                        h1 { "🎬 Tier Runner Test Report" }
                        p { "Generated on " (report.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()) }
                    }
                    div.summary {
                        div.metric {
                            h3 { "Total Tests" }
                            div.value { (summary.total) }
                        }
                        div.metric {
                            h3 { "Passed" }
                            div.value.passed-text { (summary.successful) }
                        }
                        div.metric {
                            h3 { "Failed" }
                            div.value.failed-text { (summary.failed) }
                        }
                        div.metric {
                            h3 { "Success Rate" }
                            div class=(format!("value {}", rate_class(summary.success_rate))) {
                                (format!("{:.1}%", round_rate(summary.success_rate)))
                            }
                        }
                        div.metric {
                            h3 { "Total Time" }
                            div.value { (format!("{:.2}s", summary.total_time.as_secs_f64())) }
                        }
                        div.metric {
                            h3 { "Threshold" }
                            div.value { (format!("{:.1}%", report.threshold)) }
                        }
                    }
                    @for (tier, metrics) in &report.tier_metrics {
                        (tier_section(*tier, metrics, report.outcomes_for(*tier)))
                    }
                }
            }
        }
    };

    markup.into_string()
}

fn tier_section<'a>(
    tier: Tier,
    metrics: &TierMetrics,
    outcomes: impl Iterator<Item = &'a Outcome>,
) -> Markup {
    html! {
        div.tier-section {
            div.tier-header {
                h2 { (tier_title(tier)) " Tests (" (tier.cadence()) ")" }
                p {
                    "Success Rate: " (format!("{:.1}%", round_rate(metrics.success_rate)))
                    " | Avg Duration: " (format!("{:.2}s", metrics.avg_duration.as_secs_f64()))
                }
            }
            div.tier-content {
                div.tier-counts {
                    div { strong { (metrics.total) } br; "Total" }
                    div { strong.passed-text { (metrics.passed) } br; "Passed" }
                    div { strong.failed-text { (metrics.failed) } br; "Failed" }
                    div {
                        strong class=(rate_class(metrics.success_rate)) {
                            (format!("{:.1}%", round_rate(metrics.success_rate)))
                        }
                        br;
                        "Success Rate"
                    }
                }
                @for outcome in outcomes {
                    (outcome_item(outcome))
                }
            }
        }
    }
}

fn outcome_item(outcome: &Outcome) -> Markup {
    html! {
        div class=(format!("test-item {}", outcome.status_class())) {
            div.test-line {
                span { strong { (outcome.component) } " · " (outcome.test_type) }
                span class=(format!("status {}", outcome.status_class())) {
                    (outcome.status_str())
                    " (" (format!("{:.2}s", outcome.duration.as_secs_f64()))
                    ", exit " (outcome.exit_status) ")"
                }
            }
            @if let Some(reason) = outcome.failure {
                div.failed-text { (reason.label()) }
            }
            @if !outcome.stdout.is_empty() {
                details {
                    summary { "stdout" }
                    pre.output-content { (outcome.stdout) }
                }
            }
            @if !outcome.stderr.is_empty() {
                details open[!outcome.success] {
                    summary { "stderr" }
                    pre.output-content { (outcome.stderr) }
                }
            }
        }
    }
}

fn tier_title(tier: Tier) -> String {
    let name = tier.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// ≥90% green, ≥70% amber, otherwise red.
fn rate_class(rate: f64) -> &'static str {
    if rate >= 90.0 {
        "rate-good"
    } else if rate >= 70.0 {
        "rate-fair"
    } else {
        "rate-poor"
    }
}
