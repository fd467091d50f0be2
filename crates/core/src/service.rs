//! Estimating service - core business logic
//!
//! Thin orchestration over the pure engines: loads lines, settings, and the
//! historical fleet through the store ports, then delegates to the
//! aggregation, benchmark, and coach engines. Every dependent computation
//! is recomputed from scratch on each call; memoization is left to the
//! caller.

use std::sync::Arc;

use forgebid_domain::{
    AggregateTotals, BenchmarkMaps, CoachMode, CoachRecommendation, HistoricalProject, Metric,
    Result,
};

use crate::aggregation::aggregate;
use crate::benchmark::benchmark;
use crate::coach::{infer_labor_rate, recommend, CoachSession};
use crate::ports::{CompanySettingsProvider, LineItemRepository, ProjectRegistry};

/// Facade wiring the store ports to the pure engines.
pub struct EstimatingService {
    lines: Arc<dyn LineItemRepository>,
    registry: Arc<dyn ProjectRegistry>,
    settings: Arc<dyn CompanySettingsProvider>,
}

impl EstimatingService {
    /// Create a new estimating service.
    pub fn new(
        lines: Arc<dyn LineItemRepository>,
        registry: Arc<dyn ProjectRegistry>,
        settings: Arc<dyn CompanySettingsProvider>,
    ) -> Self {
        Self { lines, registry, settings }
    }

    /// Aggregate the current project's lines along a metric.
    pub async fn current_totals(&self, project_id: &str, metric: Metric) -> Result<AggregateTotals> {
        let lines = self.lines.get_lines(project_id).await?;
        let settings = self.settings.get_settings().await?;
        Ok(aggregate(&lines, metric, &settings.markup))
    }

    /// Benchmark the historical fleet, excluding the current project.
    pub async fn fleet_benchmarks(
        &self,
        current_project: &str,
        metric: Metric,
    ) -> Result<BenchmarkMaps> {
        let settings = self.settings.get_settings().await?;
        let projects = self.registry.list_projects().await?;

        let mut fleet = Vec::with_capacity(projects.len());
        for project in projects {
            // Skip line loads for projects the engine would exclude anyway.
            if project.archived || project.id == current_project {
                continue;
            }
            let lines = self.lines.get_lines(&project.id).await?;
            fleet.push(HistoricalProject { project, lines });
        }

        Ok(benchmark(&fleet, metric, &settings.markup, Some(current_project)))
    }

    /// Compute ranked Bid Coach recommendations for a project.
    pub async fn coach_recommendations(
        &self,
        project_id: &str,
        mode: CoachMode,
    ) -> Result<Vec<CoachRecommendation>> {
        let lines = self.lines.get_lines(project_id).await?;
        let settings = self.settings.get_settings().await?;

        let current = aggregate(&lines, Metric::LaborHours, &settings.markup);
        let benchmarks = self.fleet_benchmarks(project_id, Metric::LaborHours).await?;
        let labor_rate = infer_labor_rate(&lines, &settings);

        Ok(recommend(&current, &benchmarks, mode, labor_rate))
    }

    /// Start a coach selection/commit session for a project.
    pub fn coach_session(&self, project_id: &str) -> CoachSession {
        CoachSession::new(Arc::clone(&self.lines), project_id)
    }
}
