//! Line items and company settings
//!
//! A `LineItem` is one estimated component as stored by the estimating UI.
//! Every numeric field defaults to zero so a sparse store record never
//! produces a missing value in arithmetic.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::{ALLOWANCE_CATEGORY, BID_COACH_SUBCATEGORY};
use crate::types::category::LaborCategory;

/// Line item lifecycle status. Void lines are excluded from every aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum LineStatus {
    #[default]
    Active,
    Void,
}

/// Material classification. Plate lines carry their weight in
/// `plate_total_weight` instead of `total_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum MaterialKind {
    #[default]
    Material,
    Plate,
}

/// One estimated component.
///
/// Read-only to the engine; created and edited by the estimating UI through
/// the line store. Allowance lines created by the Bid Coach are tagged with
/// `category = "Allowances"` and `sub_category = "Bid Coach"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct LineItem {
    /// Line identifier (e.g. "L12")
    pub id: String,

    #[serde(default)]
    pub status: LineStatus,

    #[serde(default)]
    pub material_kind: MaterialKind,

    #[serde(default)]
    pub description: String,

    /// Total weight for material-type lines (pounds)
    #[serde(default)]
    pub total_weight: f64,

    /// Derived total weight for plate-type lines (pounds)
    #[serde(default)]
    pub plate_total_weight: f64,

    /// Surface area (square feet)
    #[serde(default)]
    pub surface_area: f64,

    // Per-operation labor hours
    #[serde(default)]
    pub unload_hours: f64,
    #[serde(default)]
    pub cut_hours: f64,
    #[serde(default)]
    pub cope_hours: f64,
    #[serde(default)]
    pub process_plate_hours: f64,
    #[serde(default)]
    pub drill_punch_hours: f64,
    #[serde(default)]
    pub fit_hours: f64,
    #[serde(default)]
    pub weld_hours: f64,
    #[serde(default)]
    pub prep_clean_hours: f64,
    #[serde(default)]
    pub paint_hours: f64,
    #[serde(default)]
    pub handle_move_hours: f64,
    #[serde(default)]
    pub load_ship_hours: f64,

    /// Total labor hours across all operations
    #[serde(default)]
    pub total_labor_hours: f64,

    /// Labor rate applied to this line ($/hour)
    #[serde(default)]
    pub labor_rate: f64,

    // Cost totals
    #[serde(default)]
    pub material_cost: f64,
    #[serde(default)]
    pub labor_cost: f64,
    #[serde(default)]
    pub coating_cost: f64,
    #[serde(default)]
    pub hardware_cost: f64,

    /// Category tag (allowance lines use "Allowances")
    #[serde(default)]
    pub category: String,

    /// Sub-category tag (Bid Coach lines use "Bid Coach")
    #[serde(default)]
    pub sub_category: String,

    /// Free-text note; the Bid Coach writes its breakdown here
    #[serde(default)]
    pub note: String,
}

impl LineItem {
    /// Whether this line is excluded from every aggregate.
    pub fn is_void(&self) -> bool {
        self.status == LineStatus::Void
    }

    /// Whether this line is an allowance (margin buffer) rather than a
    /// physical component.
    pub fn is_allowance(&self) -> bool {
        self.category == ALLOWANCE_CATEGORY || self.sub_category == BID_COACH_SUBCATEGORY
    }

    /// Weight contributed by this line, honoring the material kind.
    pub fn effective_weight(&self) -> f64 {
        match self.material_kind {
            MaterialKind::Material => self.total_weight,
            MaterialKind::Plate => self.plate_total_weight,
        }
    }

    /// Hours recorded for one labor category.
    pub fn labor_hours(&self, category: LaborCategory) -> f64 {
        match category {
            LaborCategory::Unload => self.unload_hours,
            LaborCategory::Cut => self.cut_hours,
            LaborCategory::Cope => self.cope_hours,
            LaborCategory::ProcessPlate => self.process_plate_hours,
            LaborCategory::DrillPunch => self.drill_punch_hours,
            LaborCategory::Fit => self.fit_hours,
            LaborCategory::Weld => self.weld_hours,
            LaborCategory::PrepClean => self.prep_clean_hours,
            LaborCategory::Paint => self.paint_hours,
            LaborCategory::HandleMove => self.handle_move_hours,
            LaborCategory::LoadShip => self.load_ship_hours,
        }
    }

    /// Whether any per-operation hours are recorded. Lines without a
    /// breakdown fall back to `total_labor_hours` during recalculation.
    pub fn has_category_hours(&self) -> bool {
        LaborCategory::ALL.iter().any(|category| self.labor_hours(*category) > 0.0)
    }
}

/// Waste/overhead/profit percentages from company configuration.
///
/// All percentages default to `0` when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct MarkupSettings {
    #[serde(default)]
    pub material_waste_pct: f64,
    #[serde(default)]
    pub labor_waste_pct: f64,
    #[serde(default)]
    pub overhead_pct: f64,
    #[serde(default)]
    pub profit_pct: f64,
}

/// Company configuration consumed by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct CompanySettings {
    #[serde(default)]
    pub markup: MarkupSettings,

    /// Configured shop labor rates ($/hour), in precedence order
    #[serde(default)]
    pub labor_rates: Vec<f64>,
}

impl CompanySettings {
    /// First positive configured labor rate, if any.
    pub fn first_positive_rate(&self) -> Option<f64> {
        self.labor_rates.iter().copied().find(|rate| *rate > 0.0)
    }
}
