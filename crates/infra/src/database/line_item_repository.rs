//! SQLite-backed implementation of the `LineItemRepository` port.
//!
//! Line items are stored per project; reads return them in insertion
//! order so downstream heuristics (first positive labor rate) stay
//! deterministic.

use std::sync::Arc;

use async_trait::async_trait;
use forgebid_core::ports::LineItemRepository;
use forgebid_domain::{LineItem, LineStatus, MaterialKind, Result as DomainResult};
use rusqlite::{params, Connection, Row};
use tokio::task;
use tracing::warn;

use super::manager::DbManager;
use crate::errors::InfraError;

/// SQLite-backed line item repository.
pub struct SqliteLineItemRepository {
    db: Arc<DbManager>,
}

impl SqliteLineItemRepository {
    /// Create a new repository backed by the shared `DbManager`.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LineItemRepository for SqliteLineItemRepository {
    async fn get_lines(&self, project_id: &str) -> DomainResult<Vec<LineItem>> {
        let db = Arc::clone(&self.db);
        let project_id = project_id.to_owned();

        task::spawn_blocking(move || -> DomainResult<Vec<LineItem>> {
            let conn = db.get_connection()?;
            query_lines(&conn, &project_id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create_line(&self, project_id: &str, line: &LineItem) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let project_id = project_id.to_owned();
        let line = line.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            insert_line(&conn, &project_id, &line)
        })
        .await
        .map_err(map_join_error)?
    }
}

const INSERT_LINE_SQL: &str = "INSERT INTO line_items (
        project_id, id, status, material_kind, description,
        total_weight, plate_total_weight, surface_area,
        unload_hours, cut_hours, cope_hours, process_plate_hours,
        drill_punch_hours, fit_hours, weld_hours, prep_clean_hours,
        paint_hours, handle_move_hours, load_ship_hours,
        total_labor_hours, labor_rate,
        material_cost, labor_cost, coating_cost, hardware_cost,
        category, sub_category, note
    ) VALUES (
        ?1, ?2, ?3, ?4, ?5,
        ?6, ?7, ?8,
        ?9, ?10, ?11, ?12,
        ?13, ?14, ?15, ?16,
        ?17, ?18, ?19,
        ?20, ?21,
        ?22, ?23, ?24, ?25,
        ?26, ?27, ?28
    )";

const LINE_SELECT_FOR_PROJECT: &str = "SELECT
        id, status, material_kind, description,
        total_weight, plate_total_weight, surface_area,
        unload_hours, cut_hours, cope_hours, process_plate_hours,
        drill_punch_hours, fit_hours, weld_hours, prep_clean_hours,
        paint_hours, handle_move_hours, load_ship_hours,
        total_labor_hours, labor_rate,
        material_cost, labor_cost, coating_cost, hardware_cost,
        category, sub_category, note
    FROM line_items
    WHERE project_id = ?1
    ORDER BY rowid ASC";

fn insert_line(conn: &Connection, project_id: &str, line: &LineItem) -> DomainResult<()> {
    conn.execute(
        INSERT_LINE_SQL,
        params![
            project_id,
            line.id,
            status_to_str(line.status),
            material_kind_to_str(line.material_kind),
            line.description,
            line.total_weight,
            line.plate_total_weight,
            line.surface_area,
            line.unload_hours,
            line.cut_hours,
            line.cope_hours,
            line.process_plate_hours,
            line.drill_punch_hours,
            line.fit_hours,
            line.weld_hours,
            line.prep_clean_hours,
            line.paint_hours,
            line.handle_move_hours,
            line.load_ship_hours,
            line.total_labor_hours,
            line.labor_rate,
            line.material_cost,
            line.labor_cost,
            line.coating_cost,
            line.hardware_cost,
            line.category,
            line.sub_category,
            line.note,
        ],
    )
    .map_err(InfraError::from)?;
    Ok(())
}

fn query_lines(conn: &Connection, project_id: &str) -> DomainResult<Vec<LineItem>> {
    let mut stmt = conn.prepare(LINE_SELECT_FOR_PROJECT).map_err(InfraError::from)?;
    let lines = stmt
        .query_map(params![project_id], map_line_row)
        .map_err(InfraError::from)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(InfraError::from)?;
    Ok(lines)
}

fn map_line_row(row: &Row<'_>) -> rusqlite::Result<LineItem> {
    let status: String = row.get(1)?;
    let material_kind: String = row.get(2)?;

    Ok(LineItem {
        id: row.get(0)?,
        status: status_from_str(&status),
        material_kind: material_kind_from_str(&material_kind),
        description: row.get(3)?,
        total_weight: row.get(4)?,
        plate_total_weight: row.get(5)?,
        surface_area: row.get(6)?,
        unload_hours: row.get(7)?,
        cut_hours: row.get(8)?,
        cope_hours: row.get(9)?,
        process_plate_hours: row.get(10)?,
        drill_punch_hours: row.get(11)?,
        fit_hours: row.get(12)?,
        weld_hours: row.get(13)?,
        prep_clean_hours: row.get(14)?,
        paint_hours: row.get(15)?,
        handle_move_hours: row.get(16)?,
        load_ship_hours: row.get(17)?,
        total_labor_hours: row.get(18)?,
        labor_rate: row.get(19)?,
        material_cost: row.get(20)?,
        labor_cost: row.get(21)?,
        coating_cost: row.get(22)?,
        hardware_cost: row.get(23)?,
        category: row.get(24)?,
        sub_category: row.get(25)?,
        note: row.get(26)?,
    })
}

fn status_to_str(status: LineStatus) -> &'static str {
    match status {
        LineStatus::Active => "active",
        LineStatus::Void => "void",
    }
}

fn status_from_str(value: &str) -> LineStatus {
    match value {
        "void" => LineStatus::Void,
        "active" => LineStatus::Active,
        other => {
            warn!(%other, "unrecognised line status in line_items; treating as active");
            LineStatus::Active
        }
    }
}

fn material_kind_to_str(kind: MaterialKind) -> &'static str {
    match kind {
        MaterialKind::Material => "material",
        MaterialKind::Plate => "plate",
    }
}

fn material_kind_from_str(value: &str) -> MaterialKind {
    match value {
        "plate" => MaterialKind::Plate,
        "material" => MaterialKind::Material,
        other => {
            warn!(%other, "unrecognised material kind in line_items; treating as material");
            MaterialKind::Material
        }
    }
}

fn map_join_error(err: task::JoinError) -> forgebid_domain::ForgebidError {
    if err.is_cancelled() {
        forgebid_domain::ForgebidError::Internal("blocking line repository task cancelled".into())
    } else {
        forgebid_domain::ForgebidError::Internal(format!(
            "blocking line repository task failed: {err}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn saves_and_fetches_lines_in_order() {
        let (repo, _manager, _dir) = setup_repository().await;

        repo.create_line("EST-1", &sample_line("L1", 1000.0)).await.expect("line saved");
        repo.create_line("EST-1", &sample_line("L2", 2000.0)).await.expect("line saved");

        let lines = repo.get_lines("EST-1").await.expect("lines fetched");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].id, "L1");
        assert_eq!(lines[1].id, "L2");
        assert_eq!(lines[1].total_weight, 2000.0);
        assert_eq!(lines[0].weld_hours, 4.5);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn projects_are_isolated() {
        let (repo, _manager, _dir) = setup_repository().await;

        repo.create_line("EST-1", &sample_line("L1", 1000.0)).await.expect("line saved");
        repo.create_line("EST-2", &sample_line("L1", 3000.0)).await.expect("line saved");

        let lines = repo.get_lines("EST-2").await.expect("lines fetched");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].total_weight, 3000.0);

        assert!(repo.get_lines("EST-3").await.expect("empty fetch").is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn status_and_kind_round_trip() {
        let (repo, _manager, _dir) = setup_repository().await;

        let mut line = sample_line("L1", 500.0);
        line.status = LineStatus::Void;
        line.material_kind = MaterialKind::Plate;
        line.plate_total_weight = 750.0;
        repo.create_line("EST-1", &line).await.expect("line saved");

        let lines = repo.get_lines("EST-1").await.expect("lines fetched");
        assert!(lines[0].is_void());
        assert_eq!(lines[0].material_kind, MaterialKind::Plate);
        assert_eq!(lines[0].effective_weight(), 750.0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn duplicate_line_id_is_rejected() {
        let (repo, _manager, _dir) = setup_repository().await;

        repo.create_line("EST-1", &sample_line("L1", 500.0)).await.expect("line saved");
        let err = repo.create_line("EST-1", &sample_line("L1", 600.0)).await;
        assert!(err.is_err());
    }

    async fn setup_repository() -> (SqliteLineItemRepository, Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("lines.db");

        let manager = Arc::new(DbManager::new(&db_path, 4).expect("db manager created"));
        manager.run_migrations().expect("migrations run");

        let repo = SqliteLineItemRepository::new(manager.clone());
        (repo, manager, temp_dir)
    }

    fn sample_line(id: &str, weight: f64) -> LineItem {
        LineItem {
            id: id.to_string(),
            description: "W12x26 beam".into(),
            total_weight: weight,
            surface_area: 40.0,
            weld_hours: 4.5,
            fit_hours: 2.0,
            total_labor_hours: 6.5,
            labor_rate: 52.0,
            material_cost: 880.0,
            labor_cost: 338.0,
            category: "Beams".into(),
            ..LineItem::default()
        }
    }
}
