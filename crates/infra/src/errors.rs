//! Infrastructure error types
//!
//! Internal error type for the persistence layer; converted into the
//! domain error before crossing a port boundary.

use forgebid_domain::ForgebidError;
use thiserror::Error;

/// Infrastructure-level error
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<InfraError> for ForgebidError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Sqlite(inner) => Self::Database(inner.to_string()),
            InfraError::Pool(inner) => Self::Database(format!("connection pool: {inner}")),
            InfraError::Io(inner) => Self::Database(inner.to_string()),
            InfraError::Serde(inner) => Self::Database(inner.to_string()),
        }
    }
}
