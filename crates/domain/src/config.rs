//! Application configuration structures
//!
//! Populated by the infra config loader from environment variables or a
//! `config.toml`/`forgebid.toml` file. Company defaults feed the markup
//! waterfall and the Bid Coach labor-rate inference.

use serde::{Deserialize, Serialize};

use crate::types::estimate::{CompanySettings, MarkupSettings};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Company-wide estimating defaults
    #[serde(default)]
    pub company: CompanyConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,

    /// Connection pool size
    pub pool_size: u32,
}

/// Company-wide estimating defaults
///
/// All percentages default to `0` when absent; the engine never sees a
/// missing value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyConfig {
    /// Material waste percentage applied in the markup waterfall
    #[serde(default)]
    pub material_waste_pct: f64,

    /// Labor waste percentage applied in the markup waterfall
    #[serde(default)]
    pub labor_waste_pct: f64,

    /// Overhead percentage applied in the markup waterfall
    #[serde(default)]
    pub overhead_pct: f64,

    /// Profit percentage applied in the markup waterfall
    #[serde(default)]
    pub profit_pct: f64,

    /// Configured shop labor rates ($/hour), in precedence order
    #[serde(default)]
    pub labor_rates: Vec<f64>,
}

impl CompanyConfig {
    /// Convert configuration defaults into the settings record the engine
    /// consumes.
    pub fn settings(&self) -> CompanySettings {
        CompanySettings {
            markup: MarkupSettings {
                material_waste_pct: self.material_waste_pct,
                labor_waste_pct: self.labor_waste_pct,
                overhead_pct: self.overhead_pct,
                profit_pct: self.profit_pct,
            },
            labor_rates: self.labor_rates.clone(),
        }
    }
}
