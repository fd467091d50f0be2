//! Port interfaces for parameterized recalculation

use async_trait::async_trait;
use forgebid_domain::{AdjustmentLogEntry, Result};

/// External consumables calculator.
///
/// Produces a single dollar figure from total labor hours and an
/// equipment-hours estimate; the engine adds it to direct cost without
/// decomposing it further.
pub trait ConsumablesEstimator: Send + Sync {
    fn estimate(&self, labor_hours: f64, equipment_hours: f64) -> f64;
}

/// Append-only audit sink for parameter mutations.
///
/// Failures are logged by the caller and never block the recalculation
/// path.
#[async_trait]
pub trait AuditLogSink: Send + Sync {
    /// Append one adjustment record.
    async fn record(&self, entry: &AdjustmentLogEntry) -> Result<()>;
}
