//! Parameterized recalculation service - core business logic
//!
//! Re-runs the aggregation and markup waterfall under the session's
//! user-adjustable multipliers, producing a fresh totals snapshot on every
//! parameter change. Each mutation appends an audit record; the in-memory
//! log keeps the 50 most recent entries and mirrors every entry to the
//! audit sink.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use forgebid_domain::constants::{ADJUSTMENT_LOG_CAP, EQUIPMENT_HOURS_PER_TON, POUNDS_PER_TON};
use forgebid_domain::{
    AdjustmentLogEntry, CompanySettings, EstimateParameters, LaborCategory, LineItem, MarkupKind,
    RateKind, TotalsSnapshot,
};
use tracing::warn;
use uuid::Uuid;

use super::ports::{AuditLogSink, ConsumablesEstimator};
use crate::markup::{safe_div, waterfall, DirectCosts};

/// Live recalculation session for one estimate.
pub struct ParameterizedRecalculator {
    parameters: EstimateParameters,
    log: VecDeque<AdjustmentLogEntry>,
    consumables: Arc<dyn ConsumablesEstimator>,
    audit: Arc<dyn AuditLogSink>,
    user_id: Option<String>,
}

impl ParameterizedRecalculator {
    /// Create a session with markup percentages seeded from company
    /// settings.
    pub fn new(
        company: &CompanySettings,
        consumables: Arc<dyn ConsumablesEstimator>,
        audit: Arc<dyn AuditLogSink>,
    ) -> Self {
        Self {
            parameters: EstimateParameters::seeded(company),
            log: VecDeque::new(),
            consumables,
            audit,
            user_id: None,
        }
    }

    /// Attribute subsequent audit records to a user.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Current parameter set.
    pub fn parameters(&self) -> &EstimateParameters {
        &self.parameters
    }

    /// Adjustment records, oldest first.
    pub fn log(&self) -> impl ExactSizeIterator<Item = &AdjustmentLogEntry> {
        self.log.iter()
    }

    /// Recompute totals for the given lines under the current parameters.
    pub fn recalculate(&self, lines: &[LineItem]) -> TotalsSnapshot {
        recalculate_with(&self.parameters, lines, self.consumables.as_ref())
    }

    /// Set a labor efficiency multiplier (clamped to the valid range) and
    /// return the resulting snapshot.
    pub async fn adjust_efficiency(
        &mut self,
        lines: &[LineItem],
        category: LaborCategory,
        value: f64,
    ) -> TotalsSnapshot {
        let old_value = self.parameters.efficiency(category);
        let before = self.recalculate(lines);
        let applied = self.parameters.set_efficiency(category, value);
        let after = self.recalculate(lines);
        self.record(format!("efficiency.{}", category.key()), old_value, applied, &before, &after)
            .await;
        after
    }

    /// Set a global rate multiplier and return the resulting snapshot.
    pub async fn adjust_rate_multiplier(
        &mut self,
        lines: &[LineItem],
        kind: RateKind,
        value: f64,
    ) -> TotalsSnapshot {
        let old_value = self.parameters.rate_multiplier(kind);
        let before = self.recalculate(lines);
        let applied = self.parameters.set_rate_multiplier(kind, value);
        let after = self.recalculate(lines);
        self.record(kind.key().to_string(), old_value, applied, &before, &after).await;
        after
    }

    /// Set a session markup percentage and return the resulting snapshot.
    pub async fn adjust_markup(
        &mut self,
        lines: &[LineItem],
        kind: MarkupKind,
        value: f64,
    ) -> TotalsSnapshot {
        let old_value = self.parameters.markup_pct(kind);
        let before = self.recalculate(lines);
        let applied = self.parameters.set_markup_pct(kind, value);
        let after = self.recalculate(lines);
        self.record(kind.key().to_string(), old_value, applied, &before, &after).await;
        after
    }

    async fn record(
        &mut self,
        parameter: String,
        old_value: f64,
        new_value: f64,
        before: &TotalsSnapshot,
        after: &TotalsSnapshot,
    ) {
        let entry = AdjustmentLogEntry {
            id: Uuid::new_v4(),
            parameter,
            old_value,
            new_value,
            cost_impact: after.markup.total - before.markup.total,
            hours_impact: after.labor_hours - before.labor_hours,
            timestamp: Utc::now(),
            user_id: self.user_id.clone(),
        };

        self.log.push_back(entry.clone());
        while self.log.len() > ADJUSTMENT_LOG_CAP {
            self.log.pop_front();
        }

        if let Err(err) = self.audit.record(&entry).await {
            warn!(error = %err, parameter = %entry.parameter, "failed to mirror adjustment to audit sink");
        }
    }
}

/// Pure recalculation under an explicit parameter set.
pub fn recalculate_with(
    parameters: &EstimateParameters,
    lines: &[LineItem],
    consumables: &dyn ConsumablesEstimator,
) -> TotalsSnapshot {
    let mean_efficiency = parameters.mean_efficiency();

    let mut total_weight = 0.0;
    let mut labor_hours = 0.0;
    let mut material_cost = 0.0;
    let mut labor_cost = 0.0;
    let mut coating_cost = 0.0;
    let mut hardware_cost = 0.0;

    for line in lines.iter().filter(|line| !line.is_void()) {
        total_weight += line.effective_weight();

        // Lines without a per-operation breakdown fall back to the mean
        // multiplier over their recorded total.
        let hours: f64 = if line.has_category_hours() {
            LaborCategory::ALL
                .iter()
                .map(|category| line.labor_hours(*category) * parameters.efficiency(*category))
                .sum()
        } else {
            line.total_labor_hours * mean_efficiency
        };
        let hours = hours.max(0.0);

        labor_hours += hours;
        labor_cost += hours * line.labor_rate * parameters.labor_rate_multiplier;
        material_cost += line.material_cost * parameters.material_rate_multiplier;
        coating_cost += line.coating_cost * parameters.coating_rate_multiplier;
        hardware_cost += line.hardware_cost;
    }

    let tons = total_weight / POUNDS_PER_TON;
    let equipment_hours = tons * EQUIPMENT_HOURS_PER_TON;
    let consumables_cost = consumables.estimate(labor_hours, equipment_hours);

    let costs = DirectCosts {
        material: material_cost,
        labor: labor_cost,
        coating: coating_cost,
        hardware: hardware_cost,
        consumables: consumables_cost,
    };
    let markup = waterfall(&costs, &parameters.markup);

    TotalsSnapshot {
        total_weight,
        tons,
        labor_hours,
        material_cost,
        labor_cost,
        coating_cost,
        hardware_cost,
        consumables_cost,
        cost_per_ton: safe_div(markup.total, tons),
        cost_per_pound: safe_div(markup.total, total_weight),
        hours_per_ton: safe_div(labor_hours, tons),
        hours_per_pound: safe_div(labor_hours, total_weight),
        markup,
    }
}
