//! # Aggregation Unit Tests / 汇总单元测试
//!
//! Unit tests for success rates, per-tier metrics and report assembly.
//!
//! 成功率、按层级指标以及报告组装的单元测试。

use chrono::Local;
use std::collections::BTreeMap;
use std::time::Duration;
use tier_runner::core::aggregate::{build_report, round_rate, success_rate, summarize, tier_metrics};
use tier_runner::core::models::{CommandDescriptor, Outcome, Tier};

fn outcome(component: &str, tier: Tier, test_type: &str, status: i32, secs: u64) -> Outcome {
    let desc = CommandDescriptor::new("cmd", component, tier, test_type);
    Outcome::completed(&desc, status, String::new(), String::new(), Duration::from_secs(secs))
}

fn keyed(outcomes: Vec<Outcome>) -> BTreeMap<String, Outcome> {
    outcomes.into_iter().map(|o| (o.key(), o)).collect()
}

#[test]
fn test_success_rate_guards_zero_total() {
    assert_eq!(success_rate(0, 0), 0.0);
    assert_eq!(success_rate(3, 3), 100.0);
    assert_eq!(round_rate(success_rate(2, 3)), 66.7);
}

#[test]
fn test_summary_counts_and_rate() {
    let outcomes = [
        outcome("frontend", Tier::Critical, "unit", 0, 1),
        outcome("backend", Tier::Critical, "unit", 0, 1),
        outcome("backend", Tier::Critical, "integration", 1, 1),
    ];

    let summary = summarize(outcomes.iter(), Duration::from_secs(5));

    assert_eq!(summary.total, 3);
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(round_rate(summary.success_rate), 66.7);
    assert_eq!(summary.total_time, Duration::from_secs(5));
}

#[test]
fn test_empty_session_has_zero_rate() {
    let summary = summarize(std::iter::empty::<&Outcome>(), Duration::ZERO);

    assert_eq!(summary.total, 0);
    assert_eq!(summary.success_rate, 0.0);
    assert!(tier_metrics(std::iter::empty::<&Outcome>()).is_empty());
}

#[test]
fn test_tier_metrics_only_cover_tiers_with_outcomes() {
    let outcomes = [
        outcome("frontend", Tier::Critical, "unit", 0, 2),
        outcome("backend", Tier::Critical, "unit", 1, 4),
        outcome("system", Tier::Smoke, "health", 0, 1),
    ];

    let metrics = tier_metrics(outcomes.iter());

    assert_eq!(metrics.len(), 2);
    let critical = &metrics[&Tier::Critical];
    assert_eq!(critical.total, 2);
    assert_eq!(critical.passed, 1);
    assert_eq!(critical.failed, 1);
    assert_eq!(critical.success_rate, 50.0);
    assert_eq!(critical.avg_duration, Duration::from_secs(3));
    assert_eq!(metrics[&Tier::Smoke].success_rate, 100.0);
    assert!(!metrics.contains_key(&Tier::Important));
}

#[test]
fn test_aggregation_is_order_independent() {
    let forward = vec![
        outcome("a", Tier::Critical, "unit", 0, 1),
        outcome("b", Tier::Important, "unit", 1, 2),
        outcome("c", Tier::Secondary, "unit", 0, 3),
    ];
    let mut backward = forward.clone();
    backward.reverse();

    assert_eq!(
        summarize(forward.iter(), Duration::ZERO),
        summarize(backward.iter(), Duration::ZERO)
    );
    assert_eq!(tier_metrics(forward.iter()), tier_metrics(backward.iter()));
}

#[test]
fn test_report_threshold_verdict() {
    let outcomes = keyed(vec![
        outcome("frontend", Tier::Critical, "unit", 0, 1),
        outcome("backend", Tier::Critical, "unit", 0, 1),
        outcome("backend", Tier::Critical, "integration", 1, 1),
    ]);

    let strict = build_report(outcomes.clone(), Duration::ZERO, 80.0, Local::now());
    assert!(!strict.threshold_met());

    let lenient = build_report(outcomes, Duration::ZERO, 60.0, Local::now());
    assert!(lenient.threshold_met());
    assert_eq!(lenient.test_results.len(), 3);
    assert_eq!(lenient.outcomes_for(Tier::Critical).count(), 3);
}

#[test]
fn test_empty_report_fails_any_positive_threshold() {
    let report = build_report(BTreeMap::new(), Duration::ZERO, 80.0, Local::now());
    assert!(!report.threshold_met());
}
