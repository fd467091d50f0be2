//! Bid Coach recommendation types

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// Target-selection policy for the recommendation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum CoachMode {
    /// Prefer the won/lost blended benchmark; protects margin
    #[default]
    ProtectMargin,
    /// Correct halfway toward the benchmark; stays competitive
    WinStrategy,
}

/// Coarse reliability tier derived from historical sample size and gap
/// magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Which benchmark supplied the recommendation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum TargetSource {
    /// Mean of the won and lost pooled averages (or whichever exists)
    WonLostBlend,
    /// Company-wide pooled average
    CompanyAverage,
    /// No historical data; buffer over the current value
    BaselineBuffer,
}

impl TargetSource {
    /// Human-readable source label used in rationale text.
    pub fn label(self) -> &'static str {
        match self {
            Self::WonLostBlend => "won/lost blend",
            Self::CompanyAverage => "company average",
            Self::BaselineBuffer => "baseline buffer",
        }
    }
}

/// One target adjustment proposal for a labor category.
///
/// Deltas are clamped to `≥ 0`; the coach never recommends removing hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct CoachRecommendation {
    /// Stable category key
    pub category: String,

    /// Display label for the category
    pub label: String,

    /// Current project value (MH/ton)
    pub current_per_ton: f64,

    /// Selected target (MH/ton)
    pub target_per_ton: f64,

    pub target_source: TargetSource,

    /// Upward correction per ton, clamped to `≥ 0`
    pub delta_per_ton: f64,

    /// `delta_per_ton ×` current project tonnage
    pub total_delta_hours: f64,

    /// `total_delta_hours ×` inferred labor rate
    pub est_cost_impact: f64,

    /// Gap relative to the target, in percent
    pub gap_pct: f64,

    pub confidence: Confidence,

    /// Human-readable rationale for the dashboard
    pub rationale: String,
}

/// Lifecycle state of a coach session.
///
/// `Computed` is re-entered whenever upstream inputs change. A failed
/// commit keeps the selection so the user can retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum CoachPhase {
    Computed,
    Selected,
    Applying,
    Committed,
    Failed,
}
