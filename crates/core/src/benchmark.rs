//! Historical benchmark engine
//!
//! Computes three parallel per-ton aggregates across the historical fleet:
//! company-wide, won-only, and lost-only. Averages are pooled — each pool
//! concatenates its projects' line sets before aggregation, so a large
//! project dominates proportionally to its tonnage. Never an average of
//! per-project averages.

use std::collections::BTreeMap;

use forgebid_domain::{
    BenchmarkMaps, HistoricalProject, LineItem, MarkupSettings, Metric, ProjectStatus,
};

use crate::aggregation::aggregate;

/// Benchmark the historical fleet along the given metric.
///
/// The current project under evaluation and archived projects are excluded.
/// A pool with zero contributing lines yields an empty map, not a
/// zero-filled one.
pub fn benchmark(
    fleet: &[HistoricalProject],
    metric: Metric,
    markup: &MarkupSettings,
    exclude_project: Option<&str>,
) -> BenchmarkMaps {
    let eligible: Vec<&HistoricalProject> = fleet
        .iter()
        .filter(|entry| !entry.project.archived)
        .filter(|entry| exclude_project != Some(entry.project.id.as_str()))
        .collect();

    let (all, all_count) = pooled(eligible.iter().copied(), metric, markup);
    let (won, won_count) = pooled(
        eligible.iter().copied().filter(|entry| entry.project.status == ProjectStatus::Won),
        metric,
        markup,
    );
    let (lost, lost_count) = pooled(
        eligible.iter().copied().filter(|entry| entry.project.status == ProjectStatus::Lost),
        metric,
        markup,
    );

    BenchmarkMaps { all, won, lost, all_count, won_count, lost_count }
}

/// Pool the projects' non-void lines and aggregate once over the union.
/// Returns the per-ton map and the count of projects that contributed at
/// least one line.
fn pooled<'a, I>(projects: I, metric: Metric, markup: &MarkupSettings) -> (BTreeMap<String, f64>, usize)
where
    I: Iterator<Item = &'a HistoricalProject>,
{
    let mut contributing = 0usize;
    let mut pool: Vec<&LineItem> = Vec::new();
    for entry in projects {
        let before = pool.len();
        pool.extend(entry.lines.iter().filter(|line| !line.is_void()));
        if pool.len() > before {
            contributing += 1;
        }
    }

    if pool.is_empty() {
        return (BTreeMap::new(), 0);
    }

    let totals = aggregate(pool, metric, markup);
    (totals.per_ton, contributing)
}
