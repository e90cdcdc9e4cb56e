use cucumber::World;
use log::*;
use order_watch_engine::{
    test_utils::{
        prepare_env::prepare_test_env,
        RecordingNotifier,
        StaticOrderSource,
    },
    CycleReport,
    OrderWatchApi,
    SqliteSnapshotStore,
    WatchOptions,
};
use sqlx::{migrate::MigrateDatabase, Sqlite};

pub type TestApi = OrderWatchApi<SqliteSnapshotStore, StaticOrderSource, RecordingNotifier>;

#[derive(Default, Debug, World)]
pub struct OrderWatchWorld {
    pub system: Option<OrderWatchSystem>,
    pub last_result: Option<Result<CycleReport, String>>,
}

#[derive(Debug)]
pub struct OrderWatchSystem {
    pub db_path: String,
    pub api: TestApi,
}

impl OrderWatchWorld {
    pub fn api(&self) -> &TestApi {
        &self.system.as_ref().expect("OrderWatchApi not initialised").api
    }

    pub fn report(&self) -> &CycleReport {
        match self.last_result.as_ref().expect("No cycle has run") {
            Ok(report) => report,
            Err(e) => panic!("The last cycle failed: {e}"),
        }
    }

    pub fn retain_database(&self, scenario: &str) {
        let Some(sys) = self.system.as_ref() else { return };
        match self.last_result.as_ref() {
            Some(Err(e)) => {
                error!("🚀️ \"{scenario}\" failed after a cycle error ({e}). Database retained: {}", sys.db_path)
            },
            _ => error!("🚀️ \"{scenario}\" failed. Database retained: {}", sys.db_path),
        }
    }

    pub async fn remove_database(&mut self) {
        let Some(sys) = self.system.take() else { return };
        sys.api.store().close().await;
        match Sqlite::drop_database(&sys.db_path).await {
            Ok(()) => debug!("🚀️ Removed database: {}", sys.db_path),
            Err(e) => error!("🚀️ Could not remove database {}: {e}", sys.db_path),
        }
    }
}

impl OrderWatchSystem {
    pub async fn new(notifier: RecordingNotifier) -> Self {
        let url = prepare_test_env().await;
        let store = SqliteSnapshotStore::new_with_url(&url, 1).await.expect("Error creating connection to database");
        debug!("Created database: {url}");
        let api = OrderWatchApi::new(store, StaticOrderSource::default(), notifier, WatchOptions::default());
        Self { db_path: url, api }
    }
}
