//! Labor and cost category tables
//!
//! The estimating UI groups hours and dollars by a fixed set of shop
//! operation categories. Keys are stable identifiers used in maps and the
//! store; labels and colors feed the charts.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// Map/chart key for the derived allowance pseudo-category.
pub const ALLOWANCE_KEY: &str = "allowance";

/// Display label for the derived allowance pseudo-category.
pub const ALLOWANCE_LABEL: &str = "Allowance";

/// Shop labor operation categories.
///
/// The eleven categories cover the full fabrication sequence from receiving
/// to shipping. Each line item carries one hours field per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum LaborCategory {
    Unload,
    Cut,
    Cope,
    ProcessPlate,
    DrillPunch,
    Fit,
    Weld,
    PrepClean,
    Paint,
    HandleMove,
    LoadShip,
}

impl LaborCategory {
    /// All labor categories in shop-sequence order.
    pub const ALL: [Self; 11] = [
        Self::Unload,
        Self::Cut,
        Self::Cope,
        Self::ProcessPlate,
        Self::DrillPunch,
        Self::Fit,
        Self::Weld,
        Self::PrepClean,
        Self::Paint,
        Self::HandleMove,
        Self::LoadShip,
    ];

    /// Stable key used in category maps and the store.
    pub fn key(self) -> &'static str {
        match self {
            Self::Unload => "unload",
            Self::Cut => "cut",
            Self::Cope => "cope",
            Self::ProcessPlate => "process_plate",
            Self::DrillPunch => "drill_punch",
            Self::Fit => "fit",
            Self::Weld => "weld",
            Self::PrepClean => "prep_clean",
            Self::Paint => "paint",
            Self::HandleMove => "handle_move",
            Self::LoadShip => "load_ship",
        }
    }

    /// Display label shown in dashboards.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unload => "Unload",
            Self::Cut => "Cut",
            Self::Cope => "Cope",
            Self::ProcessPlate => "Process Plate",
            Self::DrillPunch => "Drill/Punch",
            Self::Fit => "Fit",
            Self::Weld => "Weld",
            Self::PrepClean => "Prep/Clean",
            Self::Paint => "Paint",
            Self::HandleMove => "Handle/Move",
            Self::LoadShip => "Load/Ship",
        }
    }

    /// Chart color for the category.
    pub fn color(self) -> &'static str {
        match self {
            Self::Unload => "#8d99ae",
            Self::Cut => "#e07a5f",
            Self::Cope => "#b56576",
            Self::ProcessPlate => "#6d597a",
            Self::DrillPunch => "#355070",
            Self::Fit => "#2a9d8f",
            Self::Weld => "#e9c46a",
            Self::PrepClean => "#f4a261",
            Self::Paint => "#577590",
            Self::HandleMove => "#81b29a",
            Self::LoadShip => "#3d405b",
        }
    }

    /// Resolve a category from its stable key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }

    /// Display label for a category map key, including the derived
    /// allowance pseudo-category.
    pub fn label_for_key(key: &str) -> String {
        if key == ALLOWANCE_KEY {
            return ALLOWANCE_LABEL.to_string();
        }
        Self::from_key(key).map_or_else(|| key.to_string(), |category| category.label().to_string())
    }
}

/// Cost breakdown categories for the cost metric.
///
/// Buyouts and Shipping have no wired data source yet; they always compute
/// to zero and are dropped by the positive-value filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum CostCategory {
    Material,
    Labor,
    Coating,
    Hardware,
    Buyouts,
    Overhead,
    Profit,
    Shipping,
}

impl CostCategory {
    /// All cost categories in waterfall order.
    pub const ALL: [Self; 8] = [
        Self::Material,
        Self::Labor,
        Self::Coating,
        Self::Hardware,
        Self::Buyouts,
        Self::Overhead,
        Self::Profit,
        Self::Shipping,
    ];

    /// Stable key used in category maps.
    pub fn key(self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Labor => "labor",
            Self::Coating => "coating",
            Self::Hardware => "hardware",
            Self::Buyouts => "buyouts",
            Self::Overhead => "overhead",
            Self::Profit => "profit",
            Self::Shipping => "shipping",
        }
    }

    /// Display label shown in dashboards.
    pub fn label(self) -> &'static str {
        match self {
            Self::Material => "Material",
            Self::Labor => "Labor",
            Self::Coating => "Coating",
            Self::Hardware => "Hardware",
            Self::Buyouts => "Buyouts",
            Self::Overhead => "Overhead",
            Self::Profit => "Profit",
            Self::Shipping => "Shipping",
        }
    }
}
