//! Line aggregation
//!
//! Reduces a set of line items into weight, surface area, labor-hour, and
//! cost totals, broken out per category. Pure function of its inputs:
//! identical line sets always produce bit-identical totals (fixed category
//! and line iteration order).

use std::collections::BTreeMap;

use forgebid_domain::constants::POUNDS_PER_TON;
use forgebid_domain::{
    AggregateTotals, CostCategory, LaborCategory, LineItem, MarkupSettings, Metric, ALLOWANCE_KEY,
};

use crate::markup::safe_div;

/// Aggregate line items along the given metric.
///
/// Void lines are excluded entirely; a line missing a field contributes
/// zero. Category maps only carry entries whose sum is positive, so "no
/// entry" reads as "no data".
pub fn aggregate<'a, I>(lines: I, metric: Metric, markup: &MarkupSettings) -> AggregateTotals
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let active: Vec<&LineItem> = lines.into_iter().filter(|line| !line.is_void()).collect();

    let mut total_weight = 0.0;
    let mut surface_area = 0.0;
    let mut labor_hours = 0.0;
    for line in &active {
        total_weight += line.effective_weight();
        surface_area += line.surface_area;
        labor_hours += line.total_labor_hours;
    }
    let tons = total_weight / POUNDS_PER_TON;

    let category_totals = match metric {
        Metric::LaborHours => labor_category_totals(&active),
        Metric::Cost => cost_category_totals(&active, markup),
    };

    let value_sum: f64 = category_totals.values().sum();
    let mut per_ton = BTreeMap::new();
    let mut share_pct = BTreeMap::new();
    for (key, sum) in &category_totals {
        per_ton.insert(key.clone(), safe_div(*sum, tons));
        share_pct.insert(key.clone(), safe_div(*sum, value_sum) * 100.0);
    }

    AggregateTotals {
        metric,
        total_weight,
        tons,
        surface_area,
        labor_hours,
        category_totals,
        per_ton,
        share_pct,
    }
}

fn labor_category_totals(lines: &[&LineItem]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for category in LaborCategory::ALL {
        let sum: f64 = lines.iter().map(|line| line.labor_hours(category)).sum();
        if sum > 0.0 {
            totals.insert(category.key().to_string(), sum);
        }
    }

    // Allowance lines carry their hours in the total-labor field only.
    let allowance: f64 =
        lines.iter().filter(|line| line.is_allowance()).map(|line| line.total_labor_hours).sum();
    if allowance > 0.0 {
        totals.insert(ALLOWANCE_KEY.to_string(), allowance);
    }

    totals
}

fn cost_category_totals(lines: &[&LineItem], markup: &MarkupSettings) -> BTreeMap<String, f64> {
    let mut material = 0.0;
    let mut labor = 0.0;
    let mut coating = 0.0;
    let mut hardware = 0.0;
    for line in lines {
        material += line.material_cost;
        labor += line.labor_cost;
        coating += line.coating_cost;
        hardware += line.hardware_cost;
    }

    let material = material * (1.0 + markup.material_waste_pct / 100.0);
    let labor = labor * (1.0 + markup.labor_waste_pct / 100.0);
    // No data source wired up for these yet; always zero, always dropped
    // by the positive filter below.
    let buyouts = 0.0;
    let shipping = 0.0;

    let subtotal = material + labor + coating + hardware + buyouts + shipping;
    let overhead = subtotal * markup.overhead_pct / 100.0;
    let profit = (subtotal + overhead) * markup.profit_pct / 100.0;

    let entries = [
        (CostCategory::Material, material),
        (CostCategory::Labor, labor),
        (CostCategory::Coating, coating),
        (CostCategory::Hardware, hardware),
        (CostCategory::Buyouts, buyouts),
        (CostCategory::Overhead, overhead),
        (CostCategory::Profit, profit),
        (CostCategory::Shipping, shipping),
    ];

    let mut totals = BTreeMap::new();
    for (category, value) in entries {
        if value > 0.0 {
            totals.insert(category.key().to_string(), value);
        }
    }
    totals
}
