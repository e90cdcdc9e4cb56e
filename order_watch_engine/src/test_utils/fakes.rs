use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use chrono::{DateTime, Utc};

use crate::{
    order_types::{LineItem, Order, OrderId, Snapshot},
    traits::{
        Notifier,
        NotifierError,
        OrderSource,
        OrderSourceError,
        SnapshotStore,
        SnapshotStoreError,
        DISCORD_CHARACTER_LIMIT,
    },
};

//--------------------------------------  MemorySnapshotStore  -------------------------------------------------------
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshot: Mutex<Option<Snapshot>>,
    writes: AtomicUsize,
}

impl MemorySnapshotStore {
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshot.lock().unwrap().clone()
    }

    /// Replace the stored snapshot without counting it as a write.
    pub fn replace(&self, snapshot: Snapshot) {
        *self.snapshot.lock().unwrap() = Some(snapshot);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    async fn get(&self) -> Result<Option<Snapshot>, SnapshotStoreError> {
        Ok(self.snapshot())
    }

    async fn set(&self, snapshot: &Snapshot) -> Result<(), SnapshotStoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.snapshot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }
}

//--------------------------------------  StaticOrderSource  ---------------------------------------------------------
/// An order source that returns whatever orders and line items it has been given.
#[derive(Debug, Default)]
pub struct StaticOrderSource {
    orders: Mutex<Vec<Order>>,
    items: Mutex<HashMap<OrderId, Vec<LineItem>>>,
    fail_listing: bool,
    fail_items: bool,
    item_lookups: AtomicUsize,
    last_filter: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl StaticOrderSource {
    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        self.set_orders(orders);
        self
    }

    pub fn with_items<I: Into<OrderId>>(self, order_id: I, items: Vec<LineItem>) -> Self {
        self.set_items(order_id, items);
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn failing_item_lookups(mut self) -> Self {
        self.fail_items = true;
        self
    }

    pub fn set_orders(&self, orders: Vec<Order>) {
        *self.orders.lock().unwrap() = orders;
    }

    pub fn set_items<I: Into<OrderId>>(&self, order_id: I, items: Vec<LineItem>) {
        self.items.lock().unwrap().insert(order_id.into(), items);
    }

    pub fn item_lookups(&self) -> usize {
        self.item_lookups.load(Ordering::SeqCst)
    }

    /// The marketplace and timestamp passed to the most recent `list_orders` call.
    pub fn last_filter(&self) -> Option<(String, DateTime<Utc>)> {
        self.last_filter.lock().unwrap().clone()
    }
}

impl OrderSource for StaticOrderSource {
    async fn list_orders(
        &self,
        marketplace_id: &str,
        updated_after: DateTime<Utc>,
    ) -> Result<Vec<Order>, OrderSourceError> {
        *self.last_filter.lock().unwrap() = Some((marketplace_id.to_string(), updated_after));
        // Give concurrently running cycles a chance to interleave.
        tokio::task::yield_now().await;
        if self.fail_listing {
            return Err(OrderSourceError::Unavailable("listing disabled for this test".into()));
        }
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn list_order_items(&self, order_id: &OrderId) -> Result<Vec<LineItem>, OrderSourceError> {
        self.item_lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_items {
            return Err(OrderSourceError::Unavailable(format!("no items for {order_id} in this test")));
        }
        Ok(self.items.lock().unwrap().get(order_id).cloned().unwrap_or_default())
    }
}

//--------------------------------------  RecordingNotifier  ---------------------------------------------------------
/// A notifier that records every delivered chunk.
#[derive(Debug)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    limit: usize,
    fail_after: Option<usize>,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self { messages: Mutex::new(Vec::new()), limit: DISCORD_CHARACTER_LIMIT, fail_after: None }
    }
}

impl RecordingNotifier {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Reject every chunk after the first `n` have been delivered.
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.messages.lock().unwrap().clear();
    }
}

impl Notifier for RecordingNotifier {
    async fn deliver(&self, chunk: &str) -> Result<(), NotifierError> {
        let mut messages = self.messages.lock().unwrap();
        if self.fail_after.is_some_and(|n| messages.len() >= n) {
            return Err(NotifierError::Rejected { status: 503, message: "delivery disabled for this test".into() });
        }
        messages.push(chunk.to_string());
        Ok(())
    }

    fn max_message_len(&self) -> usize {
        self.limit
    }
}
