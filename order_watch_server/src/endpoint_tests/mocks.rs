use chrono::{DateTime, Utc};
use mockall::mock;
use order_watch_engine::{
    order_types::{LineItem, Order, OrderId, Snapshot},
    traits::{Notifier, NotifierError, OrderSource, OrderSourceError, SnapshotStore, SnapshotStoreError},
};

mock! {
    pub Store {}
    impl SnapshotStore for Store {
        async fn get(&self) -> Result<Option<Snapshot>, SnapshotStoreError>;
        async fn set(&self, snapshot: &Snapshot) -> Result<(), SnapshotStoreError>;
    }
}

mock! {
    pub Source {}
    impl OrderSource for Source {
        async fn list_orders(&self, marketplace_id: &str, updated_after: DateTime<Utc>) -> Result<Vec<Order>, OrderSourceError>;
        async fn list_order_items(&self, order_id: &OrderId) -> Result<Vec<LineItem>, OrderSourceError>;
    }
}

mock! {
    pub Messenger {}
    impl Notifier for Messenger {
        async fn deliver(&self, chunk: &str) -> Result<(), NotifierError>;
    }
}
