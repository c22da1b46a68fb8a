//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints live progress while commands run and a colored summary
//! once the session's report has been written.
//!
//! 此模块在命令运行期间打印实时进度，并在会话报告写出后打印彩色摘要。

use colored::*;

use crate::core::aggregate::round_rate;
use crate::core::models::{CommandDescriptor, Outcome, Report};
use crate::core::planner::{ExecutionPlan, TierPlan};
use crate::reporting::ReportPaths;

/// Number of stderr characters shown under a failed command.
const STDERR_PREVIEW_CHARS: usize = 200;

const RULE_WIDTH: usize = 80;

/// Prints the session banner.
pub fn print_session_banner(plan: &ExecutionPlan) {
    println!("{}", "🎬 Tier Runner".bold());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!(
        "Running {} command(s) across {} tier(s), {:?} mode",
        plan.command_count(),
        plan.tiers.len(),
        plan.mode
    );
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Prints the header shown before a tier starts.
pub fn print_tier_banner(plan: &TierPlan) {
    let mode = if plan.parallel {
        format!("parallel, {} workers", plan.workers)
    } else {
        "sequential".to_string()
    };
    println!(
        "\n{}",
        format!(
            "🔥 {} TESTS ({}) [{}]",
            plan.tier.as_str().to_uppercase(),
            plan.tier.cadence(),
            mode
        )
        .cyan()
        .bold()
    );
    println!("{}", "=".repeat(60));
    if plan.descriptors.is_empty() {
        println!("{}", "  No commands declared for this tier.".dimmed());
    }
}

pub fn print_command_started(descriptor: &CommandDescriptor) {
    println!(
        "🚀 Running {} {} tests for {}...",
        descriptor.tier, descriptor.test_type, descriptor.component
    );
}

/// Prints the PASSED/FAILED line for a finished command. For failures the
/// start of stderr is shown as well.
pub fn print_outcome(outcome: &Outcome) {
    let status = if outcome.success {
        format!("✅ {}", outcome.status_str()).green()
    } else {
        format!("❌ {}", outcome.status_str()).red()
    };
    let reason = outcome
        .failure
        .map(|r| format!(" [{}]", r.label()))
        .unwrap_or_default();

    println!(
        "   {} {} ({}) - {:.2}s{}",
        status,
        outcome.component,
        outcome.tier,
        outcome.duration.as_secs_f64(),
        reason.yellow()
    );

    if !outcome.success && !outcome.stderr.trim().is_empty() {
        println!(
            "    {} {}",
            "Error:".red(),
            preview(outcome.stderr.trim(), STDERR_PREVIEW_CHARS)
        );
    }
}

/// Prints a formatted summary of the session, followed by where the reports
/// were written.
///
/// 在控制台打印格式化的会话摘要，以及报告的写出位置。
///
/// # Output Format / 输出格式
/// ```text
/// 📊 TEST EXECUTION SUMMARY
/// Total Tests: 3
/// Successful: 2
/// Failed: 1
/// Success Rate: 66.7%
/// Total Time: 1.02s
///
/// 📋 TIER BREAKDOWN:
///   CRITICAL: 2/3 passed (66.7%)
/// ```
pub fn print_summary(report: &Report, paths: &ReportPaths) {
    let summary = &report.summary;

    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{}", "📊 TEST EXECUTION SUMMARY".bold());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Total Tests: {}", summary.total);
    println!("Successful: {}", summary.successful.to_string().green());
    println!("Failed: {}", summary.failed.to_string().red());
    println!("Success Rate: {:.1}%", round_rate(summary.success_rate));
    println!("Total Time: {:.2}s", summary.total_time.as_secs_f64());

    if !report.tier_metrics.is_empty() {
        println!("\n{}", "📋 TIER BREAKDOWN:".bold());
        for (tier, metrics) in &report.tier_metrics {
            let line = format!(
                "  {}: {}/{} passed ({:.1}%)",
                tier.as_str().to_uppercase(),
                metrics.passed,
                metrics.total,
                round_rate(metrics.success_rate)
            );
            if metrics.failed == 0 {
                println!("{}", line.green());
            } else {
                println!("{}", line.red());
            }
        }
    }

    println!("\n📄 Detailed reports saved to:");
    println!("  - {}", paths.json.display());
    println!("  - {}", paths.html.display());

    let verdict = format!(
        "Success rate {:.1}% against a {:.1}% threshold",
        round_rate(summary.success_rate),
        report.threshold
    );
    if report.threshold_met() {
        println!("\n{}", format!("✅ PASSED: {verdict}").green().bold());
    } else {
        println!("\n{}", format!("❌ NEEDS ATTENTION: {verdict}").red().bold());
    }
}

/// The first `max_chars` characters of `text`, with an ellipsis if cut.
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
