//! Port interfaces for the external stores
//!
//! The engine never talks to persistence directly; the estimating UI wires
//! these traits to the infra adapters (SQLite) or to in-memory mocks in
//! tests.

use async_trait::async_trait;
use forgebid_domain::{CompanySettings, LineItem, ProjectRecord, Result};

/// Path-addressable line item store for a project.
#[async_trait]
pub trait LineItemRepository: Send + Sync {
    /// Read all line items for a project.
    async fn get_lines(&self, project_id: &str) -> Result<Vec<LineItem>>;

    /// Create one new line item. The Bid Coach commit path calls this
    /// exactly once per apply; repeated applies intentionally create
    /// additional allowance lines.
    async fn create_line(&self, project_id: &str, line: &LineItem) -> Result<()>;
}

/// Read-only registry of the historical project fleet.
#[async_trait]
pub trait ProjectRegistry: Send + Sync {
    /// List all known projects with their bid outcome and archive flag.
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>>;
}

/// Read-only provider of company-wide estimating configuration.
#[async_trait]
pub trait CompanySettingsProvider: Send + Sync {
    /// Fetch the current company settings.
    async fn get_settings(&self) -> Result<CompanySettings>;
}
