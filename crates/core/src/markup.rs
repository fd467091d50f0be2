//! Markup waterfall
//!
//! Applies waste, overhead, and profit percentages to direct costs in a
//! fixed order, and derives the per-ton / per-pound unit metrics. Every
//! division is guarded so a zero denominator yields `0`, never NaN or
//! infinity.

use forgebid_domain::{MarkupBreakdown, MarkupSettings};

/// Direct cost components feeding the waterfall.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectCosts {
    pub material: f64,
    pub labor: f64,
    pub coating: f64,
    pub hardware: f64,
    pub consumables: f64,
}

impl DirectCosts {
    /// Sum of all direct cost components.
    pub fn total(&self) -> f64 {
        self.material + self.labor + self.coating + self.hardware + self.consumables
    }
}

/// Apply the markup waterfall in its fixed order.
///
/// Material waste is taken over the full direct cost; labor waste over the
/// labor component only. Overhead compounds on the wasted subtotal, profit
/// compounds on the overheaded subtotal.
pub fn waterfall(costs: &DirectCosts, markup: &MarkupSettings) -> MarkupBreakdown {
    let direct_cost = costs.total();
    let material_waste = direct_cost * markup.material_waste_pct / 100.0;
    let labor_waste = costs.labor * markup.labor_waste_pct / 100.0;
    let cost_before_overhead = direct_cost + material_waste + labor_waste;
    let overhead = cost_before_overhead * markup.overhead_pct / 100.0;
    let cost_before_profit = cost_before_overhead + overhead;
    let profit = cost_before_profit * markup.profit_pct / 100.0;
    let total = cost_before_profit + profit;

    MarkupBreakdown {
        direct_cost,
        material_waste,
        labor_waste,
        cost_before_overhead,
        overhead,
        cost_before_profit,
        profit,
        total,
    }
}

/// Division that returns `0` instead of NaN/infinity on a degenerate
/// denominator.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waterfall_order_matches_worked_example() {
        // direct 1000 (all material), 5% material waste, 10% overhead,
        // 10% profit
        let costs = DirectCosts { material: 1000.0, ..DirectCosts::default() };
        let markup = MarkupSettings {
            material_waste_pct: 5.0,
            labor_waste_pct: 0.0,
            overhead_pct: 10.0,
            profit_pct: 10.0,
        };

        let breakdown = waterfall(&costs, &markup);
        assert_eq!(breakdown.direct_cost, 1000.0);
        assert_eq!(breakdown.material_waste, 50.0);
        assert_eq!(breakdown.labor_waste, 0.0);
        assert_eq!(breakdown.cost_before_overhead, 1050.0);
        assert_eq!(breakdown.overhead, 105.0);
        assert_eq!(breakdown.cost_before_profit, 1155.0);
        assert_eq!(breakdown.profit, 115.5);
        assert_eq!(breakdown.total, 1270.5);
    }

    #[test]
    fn labor_waste_applies_to_labor_only() {
        let costs = DirectCosts { material: 500.0, labor: 400.0, ..DirectCosts::default() };
        let markup = MarkupSettings { labor_waste_pct: 10.0, ..MarkupSettings::default() };

        let breakdown = waterfall(&costs, &markup);
        assert_eq!(breakdown.labor_waste, 40.0);
        assert_eq!(breakdown.cost_before_overhead, 940.0);
    }

    #[test]
    fn zero_percentages_pass_costs_through() {
        let costs = DirectCosts {
            material: 100.0,
            labor: 50.0,
            coating: 25.0,
            hardware: 10.0,
            consumables: 5.0,
        };

        let breakdown = waterfall(&costs, &MarkupSettings::default());
        assert_eq!(breakdown.total, 190.0);
        assert_eq!(breakdown.overhead, 0.0);
        assert_eq!(breakdown.profit, 0.0);
    }

    #[test]
    fn safe_div_never_produces_nan() {
        assert_eq!(safe_div(10.0, 0.0), 0.0);
        assert_eq!(safe_div(0.0, 0.0), 0.0);
        assert_eq!(safe_div(10.0, 4.0), 2.5);
        assert!(safe_div(1.0, 0.0).is_finite());
    }
}
