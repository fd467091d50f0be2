//! Bid Coach session - selection and commit lifecycle
//!
//! Tracks the recommendation lifecycle: `Computed → Selected → Applying →
//! Committed | Failed`. Recomputation re-enters `Computed`, dropping
//! selections for categories that no longer appear; a failed commit keeps
//! the selection so the user can retry.

use std::collections::BTreeSet;
use std::sync::Arc;

use forgebid_domain::constants::{ALLOWANCE_CATEGORY, BID_COACH_SUBCATEGORY};
use forgebid_domain::{
    CoachPhase, CoachRecommendation, ForgebidError, LineItem, LineStatus, MaterialKind, Result,
};
use tracing::info;

use crate::ports::LineItemRepository;

/// Selection and commit state for one project's coach panel.
pub struct CoachSession {
    repository: Arc<dyn LineItemRepository>,
    project_id: String,
    recommendations: Vec<CoachRecommendation>,
    selected: BTreeSet<String>,
    phase: CoachPhase,
    in_flight: bool,
    last_error: Option<String>,
}

impl CoachSession {
    /// Create a session for a project with no recommendations yet.
    pub fn new(repository: Arc<dyn LineItemRepository>, project_id: impl Into<String>) -> Self {
        Self {
            repository,
            project_id: project_id.into(),
            recommendations: Vec::new(),
            selected: BTreeSet::new(),
            phase: CoachPhase::Computed,
            in_flight: false,
            last_error: None,
        }
    }

    /// Replace the recommendation set after an upstream recomputation.
    ///
    /// Selections survive for categories still present; the rest are
    /// discarded.
    pub fn set_recommendations(&mut self, recommendations: Vec<CoachRecommendation>) {
        let surviving: BTreeSet<String> =
            recommendations.iter().map(|rec| rec.category.clone()).collect();
        self.selected.retain(|category| surviving.contains(category));
        self.recommendations = recommendations;
        self.phase =
            if self.selected.is_empty() { CoachPhase::Computed } else { CoachPhase::Selected };
        self.last_error = None;
    }

    /// Current recommendation set.
    pub fn recommendations(&self) -> &[CoachRecommendation] {
        &self.recommendations
    }

    /// Currently selected category keys.
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> CoachPhase {
        self.phase
    }

    /// Error message from the most recent failed commit, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Select a recommendation by category key. Returns false when the
    /// category is not in the current recommendation set.
    pub fn select(&mut self, category: &str) -> bool {
        let known = self.recommendations.iter().any(|rec| rec.category == category);
        if known {
            self.selected.insert(category.to_string());
            self.sync_selection_phase();
        }
        known
    }

    /// Deselect a recommendation by category key.
    pub fn deselect(&mut self, category: &str) {
        self.selected.remove(category);
        self.sync_selection_phase();
    }

    /// Commit the selected recommendations as one new allowance line.
    ///
    /// Each invocation creates exactly one new line; repeated invocation
    /// intentionally creates additional allowance lines (no dedup). A
    /// failed store write surfaces the error, keeps the selection, and
    /// leaves the session retryable.
    pub async fn apply(&mut self) -> Result<LineItem> {
        if self.in_flight {
            return Err(ForgebidError::InvalidInput(
                "a commit is already in progress for this project".into(),
            ));
        }

        let selected: Vec<CoachRecommendation> = self
            .recommendations
            .iter()
            .filter(|rec| self.selected.contains(&rec.category))
            .cloned()
            .collect();
        if selected.is_empty() {
            return Err(ForgebidError::InvalidInput("no recommendations selected".into()));
        }

        self.in_flight = true;
        self.phase = CoachPhase::Applying;

        let repository = Arc::clone(&self.repository);
        let project_id = self.project_id.clone();
        let outcome = async {
            let existing = repository.get_lines(&project_id).await?;
            let line = build_allowance_line(&existing, &selected);
            repository.create_line(&project_id, &line).await?;
            Ok::<LineItem, ForgebidError>(line)
        }
        .await;

        self.in_flight = false;
        match outcome {
            Ok(line) => {
                info!(
                    project_id = %self.project_id,
                    line_id = %line.id,
                    hours = line.total_labor_hours,
                    "bid coach allowance committed"
                );
                self.phase = CoachPhase::Committed;
                self.last_error = None;
                Ok(line)
            }
            Err(err) => {
                self.phase = CoachPhase::Failed;
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn sync_selection_phase(&mut self) {
        if matches!(self.phase, CoachPhase::Computed | CoachPhase::Selected | CoachPhase::Failed) {
            self.phase =
                if self.selected.is_empty() { CoachPhase::Computed } else { CoachPhase::Selected };
        }
    }
}

/// Build the synthetic allowance line for a selected recommendation
/// subset.
fn build_allowance_line(existing: &[LineItem], selected: &[CoachRecommendation]) -> LineItem {
    let total_hours: f64 = selected.iter().map(|rec| rec.total_delta_hours).sum();
    let total_cost: f64 = selected.iter().map(|rec| rec.est_cost_impact).sum();
    let breakdown = selected
        .iter()
        .map(|rec| format!("{}: +{:.2} MH (${:.2})", rec.label, rec.total_delta_hours, rec.est_cost_impact))
        .collect::<Vec<_>>()
        .join("; ");

    LineItem {
        id: next_line_id(existing),
        status: LineStatus::Active,
        material_kind: MaterialKind::Material,
        description: "Bid Coach allowance".into(),
        total_labor_hours: total_hours,
        labor_cost: total_cost,
        category: ALLOWANCE_CATEGORY.into(),
        sub_category: BID_COACH_SUBCATEGORY.into(),
        note: breakdown,
        ..LineItem::default()
    }
}

/// Next sequential `L{n}` identifier that does not collide with existing
/// lines.
fn next_line_id(existing: &[LineItem]) -> String {
    let highest = existing
        .iter()
        .filter_map(|line| line.id.strip_prefix('L'))
        .filter_map(|digits| digits.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("L{}", highest + 1)
}
