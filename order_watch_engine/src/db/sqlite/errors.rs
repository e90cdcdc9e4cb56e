use thiserror::Error;

use crate::traits::SnapshotStoreError;

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database connection error: {0}")]
    DriverError(#[from] sqlx::Error),
    #[error("Could not run database migrations: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error("Database query error: {0}")]
    QueryError(String),
}

impl From<SqliteDatabaseError> for SnapshotStoreError {
    fn from(e: SqliteDatabaseError) -> Self {
        SnapshotStoreError::DatabaseError(e.to_string())
    }
}
