//! Historical benchmark types
//!
//! The benchmark engine pools line items across the historical project
//! fleet and emits three parallel per-ton category maps: company-wide,
//! won-only, and lost-only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::types::estimate::LineItem;

/// Outcome of a historical project bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum ProjectStatus {
    Won,
    Lost,
    /// Still out for bid, or outcome unrecorded
    #[default]
    Open,
}

/// Project registry record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ProjectRecord {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub status: ProjectStatus,

    /// Archived projects are excluded from the benchmark fleet
    #[serde(default)]
    pub archived: bool,
}

/// A historical project together with its line set, as fed to the
/// benchmark engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct HistoricalProject {
    pub project: ProjectRecord,
    pub lines: Vec<LineItem>,
}

/// Three parallel `category → per-ton value` maps plus contributing project
/// counts.
///
/// A pool with zero contributing lines has an empty map, not a zero-filled
/// one; callers must treat "no entry" as "no data".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct BenchmarkMaps {
    /// Company-wide pooled averages
    pub all: BTreeMap<String, f64>,

    /// Won-project pooled averages
    pub won: BTreeMap<String, f64>,

    /// Lost-project pooled averages
    pub lost: BTreeMap<String, f64>,

    pub all_count: usize,
    pub won_count: usize,
    pub lost_count: usize,
}

impl BenchmarkMaps {
    /// Company-wide per-ton value for a category, `0` when absent.
    pub fn all_value(&self, key: &str) -> f64 {
        self.all.get(key).copied().unwrap_or(0.0)
    }

    /// Won-pool per-ton value for a category, `0` when absent.
    pub fn won_value(&self, key: &str) -> f64 {
        self.won.get(key).copied().unwrap_or(0.0)
    }

    /// Lost-pool per-ton value for a category, `0` when absent.
    pub fn lost_value(&self, key: &str) -> f64 {
        self.lost.get(key).copied().unwrap_or(0.0)
    }

    /// Historical sample size backing confidence scoring.
    pub fn sample_size(&self) -> usize {
        self.won_count + self.lost_count
    }
}
