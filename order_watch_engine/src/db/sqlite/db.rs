use std::fmt::Debug;

use chrono::Utc;
use log::*;
use sqlx::{migrate, SqlitePool};

use super::{documents, new_pool, SqliteDatabaseError};
use crate::{
    order_types::Snapshot,
    traits::{SnapshotStore, SnapshotStoreError},
};

/// The key under which the snapshot document is stored.
pub const SNAPSHOT_KEY: &str = "data";

/// A [`SnapshotStore`] that keeps the snapshot as a single JSON document in SQLite.
#[derive(Clone)]
pub struct SqliteSnapshotStore {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteSnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteSnapshotStore ({:?})", self.pool)
    }
}

impl SqliteSnapshotStore {
    /// Connects to the database at `url`, creating it if necessary, and brings the schema up to date.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        migrate!("./src/db/sqlite/migrations").run(&pool).await?;
        debug!("🗃️ Database migrations are up to date for {url}");
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    async fn get(&self) -> Result<Option<Snapshot>, SnapshotStoreError> {
        let mut conn = self.pool.acquire().await?;
        let Some(json) = documents::fetch_document(SNAPSHOT_KEY, &mut conn).await? else {
            return Ok(None);
        };
        let snapshot = serde_json::from_str::<Snapshot>(&json).map_err(|e| {
            error!("🗃️ The stored snapshot is not valid JSON and cannot be used. {e}");
            SnapshotStoreError::Corrupt(e.to_string())
        })?;
        trace!(
            "🗃️ Snapshot loaded: {} orders, {} tombstones, last updated {}",
            snapshot.saved_orders.len(),
            snapshot.deleted_orders.len(),
            snapshot.last_update_time
        );
        Ok(Some(snapshot))
    }

    async fn set(&self, snapshot: &Snapshot) -> Result<(), SnapshotStoreError> {
        let json =
            serde_json::to_string(snapshot).map_err(|e| SnapshotStoreError::SerializationError(e.to_string()))?;
        let mut conn = self.pool.acquire().await?;
        documents::upsert_document(SNAPSHOT_KEY, &json, Utc::now(), &mut conn).await?;
        debug!("🗃️ Snapshot saved with {} orders", snapshot.saved_orders.len());
        Ok(())
    }
}
