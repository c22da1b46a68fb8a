//! # Report Aggregation Module / 报告汇总模块
//!
//! Reduces a set of outcomes into global and per-tier summary numbers. Every
//! function here is pure: the same outcome set yields the same numbers no
//! matter the order the outcomes arrived in.
//!
//! 将一组执行结果归约为全局及各层级的汇总数据。此处所有函数都是纯函数：
//! 无论结果到达顺序如何，相同的结果集总会得到相同的数据。

use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::core::models::{Outcome, Report, Summary, Tier, TierMetrics};

/// Percentage of `passed` over `total`, defined as 0 when `total` is 0.
pub fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * passed as f64 / total as f64
    }
}

/// Rounds a percentage to one decimal place for display.
pub fn round_rate(rate: f64) -> f64 {
    (rate * 10.0).round() / 10.0
}

/// Summary numbers across every outcome. `total_time` is the session's
/// wall-clock time and is carried through unchanged.
pub fn summarize<'a>(
    outcomes: impl IntoIterator<Item = &'a Outcome>,
    total_time: Duration,
) -> Summary {
    let (total, successful) = outcomes
        .into_iter()
        .fold((0, 0), |(total, passed), o| (total + 1, passed + usize::from(o.success)));

    Summary {
        total,
        successful,
        failed: total - successful,
        success_rate: success_rate(successful, total),
        total_time,
    }
}

/// Metrics for every tier label present in `outcomes`. Tiers with no
/// outcomes are absent from the result.
///
/// 为 `outcomes` 中出现的每个层级计算指标。没有结果的层级不会出现在返回值中。
pub fn tier_metrics<'a>(
    outcomes: impl IntoIterator<Item = &'a Outcome>,
) -> BTreeMap<Tier, TierMetrics> {
    #[derive(Default)]
    struct Tally {
        total: usize,
        passed: usize,
        duration: Duration,
    }

    let mut tallies: BTreeMap<Tier, Tally> = BTreeMap::new();
    for outcome in outcomes {
        let tally = tallies.entry(outcome.tier).or_default();
        tally.total += 1;
        tally.passed += usize::from(outcome.success);
        tally.duration += outcome.duration;
    }

    tallies
        .into_iter()
        .map(|(tier, tally)| {
            let metrics = TierMetrics {
                total: tally.total,
                passed: tally.passed,
                failed: tally.total - tally.passed,
                success_rate: success_rate(tally.passed, tally.total),
                avg_duration: tally.duration / tally.total as u32,
            };
            (tier, metrics)
        })
        .collect()
}

/// Builds the session report from the keyed outcome set.
pub fn build_report(
    outcomes: BTreeMap<String, Outcome>,
    total_time: Duration,
    threshold: f64,
    timestamp: DateTime<Local>,
) -> Report {
    Report {
        timestamp,
        threshold,
        summary: summarize(outcomes.values(), total_time),
        tier_metrics: tier_metrics(outcomes.values()),
        test_results: outcomes,
    }
}
