//! Shared test support for core integration tests

pub mod repositories;

use forgebid_domain::LineItem;

/// Build an active material line with weld hours only.
pub fn weld_line(id: &str, weight: f64, weld_hours: f64) -> LineItem {
    LineItem {
        id: id.to_string(),
        total_weight: weight,
        weld_hours,
        total_labor_hours: weld_hours,
        ..LineItem::default()
    }
}
