//! SQLite persistence adapters
//!
//! Implementations of the core store ports over a shared connection pool.
//! All queries run on the blocking thread pool via `task::spawn_blocking`.

pub mod audit_repository;
pub mod line_item_repository;
pub mod manager;
pub mod project_repository;

pub use audit_repository::SqliteAuditLogSink;
pub use line_item_repository::SqliteLineItemRepository;
pub use manager::DbManager;
pub use project_repository::SqliteProjectRegistry;
