//! Parameter adjustment types
//!
//! User-adjustable multipliers for the live recalculation session, and the
//! audit record appended on every parameter mutation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

use crate::constants::{EFFICIENCY_MAX, EFFICIENCY_MIN};
use crate::types::category::LaborCategory;
use crate::types::estimate::{CompanySettings, MarkupSettings};

/// Which global rate multiplier a mutation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum RateKind {
    Labor,
    Material,
    Coating,
}

impl RateKind {
    /// Stable parameter key used in audit records.
    pub fn key(self) -> &'static str {
        match self {
            Self::Labor => "rate.labor",
            Self::Material => "rate.material",
            Self::Coating => "rate.coating",
        }
    }
}

/// Which markup percentage a mutation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum MarkupKind {
    MaterialWaste,
    LaborWaste,
    Overhead,
    Profit,
}

impl MarkupKind {
    /// Stable parameter key used in audit records.
    pub fn key(self) -> &'static str {
        match self {
            Self::MaterialWaste => "markup.material_waste",
            Self::LaborWaste => "markup.labor_waste",
            Self::Overhead => "markup.overhead",
            Self::Profit => "markup.profit",
        }
    }
}

/// The live parameter set for a recalculation session.
///
/// Markup percentages are seeded from company settings and independent of
/// them once the user starts adjusting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct EstimateParameters {
    /// Per-operation labor efficiency multipliers, clamped to [0.5, 2.0]
    pub efficiency: BTreeMap<LaborCategory, f64>,

    pub labor_rate_multiplier: f64,
    pub material_rate_multiplier: f64,
    pub coating_rate_multiplier: f64,

    /// Session markup percentages
    pub markup: MarkupSettings,
}

impl Default for EstimateParameters {
    fn default() -> Self {
        let efficiency =
            LaborCategory::ALL.into_iter().map(|category| (category, 1.0)).collect();
        Self {
            efficiency,
            labor_rate_multiplier: 1.0,
            material_rate_multiplier: 1.0,
            coating_rate_multiplier: 1.0,
            markup: MarkupSettings::default(),
        }
    }
}

impl EstimateParameters {
    /// Fresh parameters with markup seeded from company settings.
    pub fn seeded(company: &CompanySettings) -> Self {
        Self { markup: company.markup.clone(), ..Self::default() }
    }

    /// Efficiency multiplier for a category, `1.0` when unset.
    pub fn efficiency(&self, category: LaborCategory) -> f64 {
        self.efficiency.get(&category).copied().unwrap_or(1.0)
    }

    /// Arithmetic mean of all eleven multipliers; applied to lines without
    /// a per-category breakdown.
    pub fn mean_efficiency(&self) -> f64 {
        let sum: f64 =
            LaborCategory::ALL.iter().map(|category| self.efficiency(*category)).sum();
        sum / LaborCategory::ALL.len() as f64
    }

    /// Set an efficiency multiplier, clamping to the valid range. Returns
    /// the value actually applied.
    pub fn set_efficiency(&mut self, category: LaborCategory, value: f64) -> f64 {
        let clamped = value.clamp(EFFICIENCY_MIN, EFFICIENCY_MAX);
        self.efficiency.insert(category, clamped);
        clamped
    }

    /// Current multiplier for a rate kind.
    pub fn rate_multiplier(&self, kind: RateKind) -> f64 {
        match kind {
            RateKind::Labor => self.labor_rate_multiplier,
            RateKind::Material => self.material_rate_multiplier,
            RateKind::Coating => self.coating_rate_multiplier,
        }
    }

    /// Set a rate multiplier, floored at zero. Returns the value applied.
    pub fn set_rate_multiplier(&mut self, kind: RateKind, value: f64) -> f64 {
        let applied = value.max(0.0);
        match kind {
            RateKind::Labor => self.labor_rate_multiplier = applied,
            RateKind::Material => self.material_rate_multiplier = applied,
            RateKind::Coating => self.coating_rate_multiplier = applied,
        }
        applied
    }

    /// Current percentage for a markup kind.
    pub fn markup_pct(&self, kind: MarkupKind) -> f64 {
        match kind {
            MarkupKind::MaterialWaste => self.markup.material_waste_pct,
            MarkupKind::LaborWaste => self.markup.labor_waste_pct,
            MarkupKind::Overhead => self.markup.overhead_pct,
            MarkupKind::Profit => self.markup.profit_pct,
        }
    }

    /// Set a markup percentage. Returns the value applied.
    pub fn set_markup_pct(&mut self, kind: MarkupKind, value: f64) -> f64 {
        match kind {
            MarkupKind::MaterialWaste => self.markup.material_waste_pct = value,
            MarkupKind::LaborWaste => self.markup.labor_waste_pct = value,
            MarkupKind::Overhead => self.markup.overhead_pct = value,
            MarkupKind::Profit => self.markup.profit_pct = value,
        }
        value
    }
}

/// Audit record for one parameter mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct AdjustmentLogEntry {
    pub id: Uuid,

    /// Stable parameter key (e.g. "efficiency.weld", "markup.overhead")
    pub parameter: String,

    pub old_value: f64,
    pub new_value: f64,

    /// Change in total cost caused by the mutation
    pub cost_impact: f64,

    /// Change in total labor hours caused by the mutation
    pub hours_impact: f64,

    pub timestamp: DateTime<Utc>,

    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_identity() {
        let params = EstimateParameters::default();
        assert_eq!(params.efficiency(LaborCategory::Weld), 1.0);
        assert_eq!(params.mean_efficiency(), 1.0);
        assert_eq!(params.labor_rate_multiplier, 1.0);
        assert_eq!(params.markup.overhead_pct, 0.0);
    }

    #[test]
    fn efficiency_clamps_to_valid_range() {
        let mut params = EstimateParameters::default();
        assert_eq!(params.set_efficiency(LaborCategory::Cut, 3.0), 2.0);
        assert_eq!(params.set_efficiency(LaborCategory::Cut, 0.1), 0.5);
        assert_eq!(params.set_efficiency(LaborCategory::Cut, 1.25), 1.25);
        assert_eq!(params.efficiency(LaborCategory::Cut), 1.25);
    }

    #[test]
    fn mean_efficiency_tracks_mutations() {
        let mut params = EstimateParameters::default();
        params.set_efficiency(LaborCategory::Weld, 2.0);
        // 10 categories at 1.0 plus one at 2.0
        let expected = 12.0 / 11.0;
        assert!((params.mean_efficiency() - expected).abs() < 1e-12);
    }

    #[test]
    fn seeded_markup_copies_company_settings() {
        let company = CompanySettings {
            markup: MarkupSettings {
                material_waste_pct: 5.0,
                labor_waste_pct: 1.0,
                overhead_pct: 12.0,
                profit_pct: 10.0,
            },
            labor_rates: vec![50.0],
        };

        let params = EstimateParameters::seeded(&company);
        assert_eq!(params.markup, company.markup);
        assert_eq!(params.labor_rate_multiplier, 1.0);
    }
}
