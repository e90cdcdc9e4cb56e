use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

use crate::SqliteSnapshotStore;

/// Creates a fresh, migrated database at a random location and returns its URL.
pub async fn prepare_test_env() -> String {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    let url = random_db_path();
    create_database(&url).await;
    url
}

pub fn random_db_path() -> String {
    let dir = std::env::temp_dir();
    format!("sqlite://{}/order_watch_test_{}.db", dir.display(), rand::random::<u64>())
}

pub async fn create_database(url: &str) {
    if let Err(e) = Sqlite::drop_database(url).await {
        trace!("Error dropping database {url}: {e:?}");
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    info!("Created Sqlite database {url}");
}

pub async fn new_test_store() -> (String, SqliteSnapshotStore) {
    let url = prepare_test_env().await;
    let store = SqliteSnapshotStore::new_with_url(&url, 1).await.expect("Error creating connection to database");
    (url, store)
}

pub async fn drop_database(url: &str) {
    if let Err(e) = Sqlite::drop_database(url).await {
        warn!("Error dropping database {url}: {e:?}");
    }
}
