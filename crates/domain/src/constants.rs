//! Domain constants
//!
//! Centralized location for all domain-level constants used by the
//! estimating engine.

// Weight / normalization
pub const POUNDS_PER_TON: f64 = 2000.0;

// Allowance line tagging
pub const ALLOWANCE_CATEGORY: &str = "Allowances";
pub const BID_COACH_SUBCATEGORY: &str = "Bid Coach";

// Parameterized recalculation
pub const EFFICIENCY_MIN: f64 = 0.5;
pub const EFFICIENCY_MAX: f64 = 2.0;
pub const ADJUSTMENT_LOG_CAP: usize = 50;
pub const EQUIPMENT_HOURS_PER_TON: f64 = 1.5;

// Bid Coach policy
pub const FALLBACK_LABOR_RATE: f64 = 45.0;
pub const MAX_RECOMMENDATIONS: usize = 6;
pub const MIN_DELTA_PER_TON: f64 = 0.01;
pub const MATERIAL_GAP_PCT: f64 = 5.0;
pub const CONFIDENCE_UPGRADE_GAP_PCT: f64 = 15.0;
pub const CONFIDENCE_HIGH_SAMPLES: usize = 10;
pub const CONFIDENCE_MEDIUM_SAMPLES: usize = 5;
pub const PROTECT_MARGIN_BUFFER: f64 = 1.05;
pub const WIN_STRATEGY_BUFFER: f64 = 1.1;
pub const WIN_STRATEGY_CORRECTION: f64 = 0.5;
