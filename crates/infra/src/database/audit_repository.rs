//! SQLite-backed implementation of the `AuditLogSink` port.
//!
//! Adjustment records are append-only and scoped to one project per sink
//! instance. Write failures are surfaced to the caller, which logs and
//! continues; they never block the recalculation path.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use forgebid_core::recalc::ports::AuditLogSink;
use forgebid_domain::{AdjustmentLogEntry, Result as DomainResult};
use rusqlite::{params, Connection, Row};
use tokio::task;
use tracing::warn;
use uuid::Uuid;

use super::manager::DbManager;
use crate::errors::InfraError;

/// SQLite-backed audit log sink for one project.
pub struct SqliteAuditLogSink {
    db: Arc<DbManager>,
    project_id: String,
}

impl SqliteAuditLogSink {
    /// Create a sink scoped to one project.
    pub fn new(db: Arc<DbManager>, project_id: impl Into<String>) -> Self {
        Self { db, project_id: project_id.into() }
    }

    /// Most recent adjustment records for this project, newest first.
    pub async fn recent(&self, limit: usize) -> DomainResult<Vec<AdjustmentLogEntry>> {
        let db = Arc::clone(&self.db);
        let project_id = self.project_id.clone();

        task::spawn_blocking(move || -> DomainResult<Vec<AdjustmentLogEntry>> {
            let conn = db.get_connection()?;
            query_recent(&conn, &project_id, limit)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl AuditLogSink for SqliteAuditLogSink {
    async fn record(&self, entry: &AdjustmentLogEntry) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let project_id = self.project_id.clone();
        let entry = entry.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            insert_entry(&conn, &project_id, &entry)
        })
        .await
        .map_err(map_join_error)?
    }
}

const INSERT_ENTRY_SQL: &str = "INSERT INTO adjustment_log (
        id, project_id, parameter, old_value, new_value,
        cost_impact, hours_impact, recorded_at, user_id
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

const ENTRY_SELECT_RECENT: &str = "SELECT
        id, parameter, old_value, new_value,
        cost_impact, hours_impact, recorded_at, user_id
    FROM adjustment_log
    WHERE project_id = ?1
    ORDER BY recorded_at DESC, rowid DESC
    LIMIT ?2";

fn insert_entry(conn: &Connection, project_id: &str, entry: &AdjustmentLogEntry) -> DomainResult<()> {
    conn.execute(
        INSERT_ENTRY_SQL,
        params![
            entry.id.to_string(),
            project_id,
            entry.parameter,
            entry.old_value,
            entry.new_value,
            entry.cost_impact,
            entry.hours_impact,
            entry.timestamp.timestamp(),
            entry.user_id,
        ],
    )
    .map_err(InfraError::from)?;
    Ok(())
}

fn query_recent(
    conn: &Connection,
    project_id: &str,
    limit: usize,
) -> DomainResult<Vec<AdjustmentLogEntry>> {
    let mut stmt = conn.prepare(ENTRY_SELECT_RECENT).map_err(InfraError::from)?;
    let entries = stmt
        .query_map(params![project_id, limit as i64], map_entry_row)
        .map_err(InfraError::from)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(InfraError::from)?;
    Ok(entries)
}

fn map_entry_row(row: &Row<'_>) -> rusqlite::Result<AdjustmentLogEntry> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id).unwrap_or_else(|_| {
        warn!(%id, "unparseable adjustment id in adjustment_log");
        Uuid::nil()
    });
    let recorded_at: i64 = row.get(6)?;

    Ok(AdjustmentLogEntry {
        id,
        parameter: row.get(1)?,
        old_value: row.get(2)?,
        new_value: row.get(3)?,
        cost_impact: row.get(4)?,
        hours_impact: row.get(5)?,
        timestamp: DateTime::from_timestamp(recorded_at, 0).unwrap_or(DateTime::UNIX_EPOCH),
        user_id: row.get(7)?,
    })
}

fn map_join_error(err: task::JoinError) -> forgebid_domain::ForgebidError {
    if err.is_cancelled() {
        forgebid_domain::ForgebidError::Internal("blocking audit sink task cancelled".into())
    } else {
        forgebid_domain::ForgebidError::Internal(format!("blocking audit sink task failed: {err}"))
    }
}
