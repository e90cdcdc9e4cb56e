use chrono::{DateTime, Utc};
use log::trace;
use sqlx::SqliteConnection;

use crate::db::sqlite::SqliteDatabaseError;

/// Returns the raw JSON stored under `key`, if any.
pub async fn fetch_document(key: &str, conn: &mut SqliteConnection) -> Result<Option<String>, SqliteDatabaseError> {
    let value = sqlx::query_scalar::<_, String>("SELECT value FROM documents WHERE key = $1")
        .bind(key)
        .fetch_optional(conn)
        .await?;
    trace!("🗃️ Document '{key}' fetched. Found: {}", value.is_some());
    Ok(value)
}

/// Inserts or replaces the document stored under `key`. Last write wins.
pub async fn upsert_document(
    key: &str,
    value: &str,
    updated_at: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<(), SqliteDatabaseError> {
    let result = sqlx::query(
        r#"
            INSERT INTO documents (key, value, updated_at) VALUES ($1, $2, $3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at;
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(updated_at)
    .execute(conn)
    .await?;
    if result.rows_affected() != 1 {
        return Err(SqliteDatabaseError::QueryError(format!(
            "Upsert of document '{key}' affected {} rows",
            result.rows_affected()
        )));
    }
    trace!("🗃️ Document '{key}' saved ({} bytes)", value.len());
    Ok(())
}
