use thiserror::Error;

use crate::order_types::Snapshot;

#[derive(Debug, Clone, Error)]
pub enum SnapshotStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("The stored snapshot could not be read. {0}")]
    Corrupt(String),
    #[error("Could not serialize snapshot. {0}")]
    SerializationError(String),
}

impl From<sqlx::Error> for SnapshotStoreError {
    fn from(e: sqlx::Error) -> Self {
        SnapshotStoreError::DatabaseError(e.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait SnapshotStore {
    /// Fetch the last persisted snapshot. Returns `None` on the very first run.
    async fn get(&self) -> Result<Option<Snapshot>, SnapshotStoreError>;
    /// Replace the persisted snapshot.
    async fn set(&self, snapshot: &Snapshot) -> Result<(), SnapshotStoreError>;
}
