//! Mock repository implementations for testing
//!
//! Provides in-memory mocks for all core store ports, enabling
//! deterministic unit tests without database dependencies.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use forgebid_core::{
    AuditLogSink, CompanySettingsProvider, ConsumablesEstimator, LineItemRepository,
    ProjectRegistry,
};
use forgebid_domain::{
    AdjustmentLogEntry, CompanySettings, ForgebidError, LineItem, ProjectRecord,
    Result as DomainResult,
};

/// In-memory mock for `LineItemRepository`.
///
/// Stores line sets per project and supports simulating store-write
/// failures for commit-retry tests.
#[derive(Default)]
pub struct MockLineItemRepository {
    lines: Mutex<HashMap<String, Vec<LineItem>>>,
    fail_creates: AtomicBool,
}

impl MockLineItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a project's line set.
    pub fn with_project(self, project_id: &str, lines: Vec<LineItem>) -> Self {
        self.lines.lock().expect("lines lock").insert(project_id.to_string(), lines);
        self
    }

    /// Make subsequent `create_line` calls fail (or succeed again).
    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of a project's current lines.
    pub fn lines_for(&self, project_id: &str) -> Vec<LineItem> {
        self.lines.lock().expect("lines lock").get(project_id).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl LineItemRepository for MockLineItemRepository {
    async fn get_lines(&self, project_id: &str) -> DomainResult<Vec<LineItem>> {
        Ok(self.lines_for(project_id))
    }

    async fn create_line(&self, project_id: &str, line: &LineItem) -> DomainResult<()> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(ForgebidError::Store("line store unavailable".into()));
        }
        self.lines
            .lock()
            .expect("lines lock")
            .entry(project_id.to_string())
            .or_default()
            .push(line.clone());
        Ok(())
    }
}

/// In-memory mock for `ProjectRegistry`.
#[derive(Default)]
pub struct MockProjectRegistry {
    projects: Vec<ProjectRecord>,
}

impl MockProjectRegistry {
    pub fn new(projects: Vec<ProjectRecord>) -> Self {
        Self { projects }
    }
}

#[async_trait]
impl ProjectRegistry for MockProjectRegistry {
    async fn list_projects(&self) -> DomainResult<Vec<ProjectRecord>> {
        Ok(self.projects.clone())
    }
}

/// In-memory mock for `CompanySettingsProvider`.
#[derive(Default)]
pub struct MockSettingsProvider {
    settings: CompanySettings,
}

impl MockSettingsProvider {
    pub fn new(settings: CompanySettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl CompanySettingsProvider for MockSettingsProvider {
    async fn get_settings(&self) -> DomainResult<CompanySettings> {
        Ok(self.settings.clone())
    }
}

/// Recording mock for `AuditLogSink`, with an optional failure switch.
#[derive(Default)]
pub struct RecordingAuditSink {
    entries: Mutex<Vec<AdjustmentLogEntry>>,
    fail: AtomicBool,
}

impl RecordingAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn entries(&self) -> Vec<AdjustmentLogEntry> {
        self.entries.lock().expect("entries lock").clone()
    }
}

#[async_trait]
impl AuditLogSink for RecordingAuditSink {
    async fn record(&self, entry: &AdjustmentLogEntry) -> DomainResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ForgebidError::Store("audit sink unavailable".into()));
        }
        self.entries.lock().expect("entries lock").push(entry.clone());
        Ok(())
    }
}

/// Flat-rate consumables estimator for tests.
pub struct FlatConsumables(pub f64);

impl ConsumablesEstimator for FlatConsumables {
    fn estimate(&self, labor_hours: f64, equipment_hours: f64) -> f64 {
        (labor_hours + equipment_hours) * self.0
    }
}
