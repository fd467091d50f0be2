//! Aggregation outputs
//!
//! `AggregateTotals` is the output of the line aggregator; `TotalsSnapshot`
//! is the richer result of a parameterized recalculation including the full
//! markup waterfall.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// Which axis an aggregation measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum Metric {
    /// Man-hours per labor operation category
    LaborHours,
    /// Dollars per cost category
    Cost,
}

/// Output of the line aggregator.
///
/// Category maps are keyed by stable category keys and only carry entries
/// with a positive value; "no entry" means "no data", distinct from zero.
/// Per-ton values are `0` when total weight is `0`, never NaN or infinite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct AggregateTotals {
    pub metric: Metric,

    /// Total weight across non-void lines (pounds)
    pub total_weight: f64,

    /// Total weight expressed in tons (weight / 2000)
    pub tons: f64,

    /// Total surface area across non-void lines
    pub surface_area: f64,

    /// Total labor hours across non-void lines
    pub labor_hours: f64,

    /// Raw per-category sums (hours or dollars)
    pub category_totals: BTreeMap<String, f64>,

    /// Per-category values normalized to tons
    pub per_ton: BTreeMap<String, f64>,

    /// Per-category share of the metric total, in percent
    pub share_pct: BTreeMap<String, f64>,
}

impl AggregateTotals {
    /// Per-ton value for a category key, `0` when the category has no data.
    pub fn per_ton_value(&self, key: &str) -> f64 {
        self.per_ton.get(key).copied().unwrap_or(0.0)
    }

    /// Raw sum for a category key, `0` when the category has no data.
    pub fn category_total(&self, key: &str) -> f64 {
        self.category_totals.get(key).copied().unwrap_or(0.0)
    }
}

/// Fixed-order markup waterfall breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct MarkupBreakdown {
    pub direct_cost: f64,
    pub material_waste: f64,
    pub labor_waste: f64,
    pub cost_before_overhead: f64,
    pub overhead: f64,
    pub cost_before_profit: f64,
    pub profit: f64,
    pub total: f64,
}

/// Live totals produced by the parameterized recalculator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct TotalsSnapshot {
    pub total_weight: f64,
    pub tons: f64,

    /// Labor hours after efficiency multipliers
    pub labor_hours: f64,

    // Direct cost components after rate multipliers
    pub material_cost: f64,
    pub labor_cost: f64,
    pub coating_cost: f64,
    pub hardware_cost: f64,
    pub consumables_cost: f64,

    /// Full markup waterfall over the direct costs
    pub markup: MarkupBreakdown,

    // Derived unit metrics, `0` on a zero denominator
    pub cost_per_ton: f64,
    pub cost_per_pound: f64,
    pub hours_per_ton: f64,
    pub hours_per_pound: f64,
}
