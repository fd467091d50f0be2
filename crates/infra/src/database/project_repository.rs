//! SQLite-backed implementation of the `ProjectRegistry` port.

use std::sync::Arc;

use async_trait::async_trait;
use forgebid_core::ports::ProjectRegistry;
use forgebid_domain::{ProjectRecord, ProjectStatus, Result as DomainResult};
use rusqlite::{params, Connection, Row};
use tokio::task;
use tracing::warn;

use super::manager::DbManager;
use crate::errors::InfraError;

/// SQLite-backed project registry.
pub struct SqliteProjectRegistry {
    db: Arc<DbManager>,
}

impl SqliteProjectRegistry {
    /// Create a new registry backed by the shared `DbManager`.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert or update a project record.
    pub async fn upsert_project(&self, record: &ProjectRecord) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let record = record.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT OR REPLACE INTO projects (id, name, status, archived) VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.id,
                    record.name,
                    status_to_str(record.status),
                    i64::from(record.archived)
                ],
            )
            .map_err(InfraError::from)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl ProjectRegistry for SqliteProjectRegistry {
    async fn list_projects(&self) -> DomainResult<Vec<ProjectRecord>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<ProjectRecord>> {
            let conn = db.get_connection()?;
            query_projects(&conn)
        })
        .await
        .map_err(map_join_error)?
    }
}

const PROJECT_SELECT_ALL: &str =
    "SELECT id, name, status, archived FROM projects ORDER BY id ASC";

fn query_projects(conn: &Connection) -> DomainResult<Vec<ProjectRecord>> {
    let mut stmt = conn.prepare(PROJECT_SELECT_ALL).map_err(InfraError::from)?;
    let projects = stmt
        .query_map(params![], map_project_row)
        .map_err(InfraError::from)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(InfraError::from)?;
    Ok(projects)
}

fn map_project_row(row: &Row<'_>) -> rusqlite::Result<ProjectRecord> {
    let status: String = row.get(2)?;
    Ok(ProjectRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        status: status_from_str(&status),
        archived: row.get::<_, i64>(3)? != 0,
    })
}

fn status_to_str(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Won => "won",
        ProjectStatus::Lost => "lost",
        ProjectStatus::Open => "open",
    }
}

fn status_from_str(value: &str) -> ProjectStatus {
    match value {
        "won" => ProjectStatus::Won,
        "lost" => ProjectStatus::Lost,
        "open" => ProjectStatus::Open,
        other => {
            warn!(%other, "unrecognised project status in projects; treating as open");
            ProjectStatus::Open
        }
    }
}

fn map_join_error(err: task::JoinError) -> forgebid_domain::ForgebidError {
    if err.is_cancelled() {
        forgebid_domain::ForgebidError::Internal("blocking project registry task cancelled".into())
    } else {
        forgebid_domain::ForgebidError::Internal(format!(
            "blocking project registry task failed: {err}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn upsert_and_list_round_trip() {
        let (registry, _manager, _dir) = setup_registry().await;

        registry
            .upsert_project(&ProjectRecord {
                id: "P1".into(),
                name: "Depot frame".into(),
                status: ProjectStatus::Won,
                archived: false,
            })
            .await
            .expect("project saved");
        registry
            .upsert_project(&ProjectRecord {
                id: "P2".into(),
                name: "Yard canopy".into(),
                status: ProjectStatus::Lost,
                archived: true,
            })
            .await
            .expect("project saved");

        let projects = registry.list_projects().await.expect("projects listed");
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].status, ProjectStatus::Won);
        assert!(projects[1].archived);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn upsert_replaces_existing_record() {
        let (registry, _manager, _dir) = setup_registry().await;

        let mut record = ProjectRecord {
            id: "P1".into(),
            name: "Depot frame".into(),
            status: ProjectStatus::Open,
            archived: false,
        };
        registry.upsert_project(&record).await.expect("project saved");

        record.status = ProjectStatus::Won;
        registry.upsert_project(&record).await.expect("project updated");

        let projects = registry.list_projects().await.expect("projects listed");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].status, ProjectStatus::Won);
    }

    async fn setup_registry() -> (SqliteProjectRegistry, Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("projects.db");

        let manager = Arc::new(DbManager::new(&db_path, 4).expect("db manager created"));
        manager.run_migrations().expect("migrations run");

        let registry = SqliteProjectRegistry::new(manager.clone());
        (registry, manager, temp_dir)
    }
}
