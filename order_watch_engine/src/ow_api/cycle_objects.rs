use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::{
    formatter::FormatOptions,
    order_types::{Order, OrderId},
    reconciler::TombstonePolicy,
};

/// Amazon's US marketplace
pub const DEFAULT_MARKETPLACE_ID: &str = "ATVPDKIKX0DER";
pub const DEFAULT_ORDER_LOOKBACK_DAYS: i64 = 30;

/// The time window used to filter the order listing.
///
/// Every cycle must see the complete set of orders in the window, since anything missing from the listing is treated
/// as removed. The last cycle's timestamp is therefore never used as the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderWindow {
    /// Orders updated after a fixed point in time
    Since(DateTime<Utc>),
    /// Orders updated within a rolling window ending now
    Lookback(Duration),
}

impl Default for OrderWindow {
    fn default() -> Self {
        Self::Lookback(Duration::days(DEFAULT_ORDER_LOOKBACK_DAYS))
    }
}

impl OrderWindow {
    pub fn updated_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Since(t) => *t,
            Self::Lookback(d) => now - *d,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    pub marketplace_id: String,
    pub order_window: OrderWindow,
    pub format: FormatOptions,
    pub tombstones: TombstonePolicy,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            marketplace_id: DEFAULT_MARKETPLACE_ID.to_string(),
            order_window: OrderWindow::default(),
            format: FormatOptions::default(),
            tombstones: TombstonePolicy::default(),
        }
    }
}

/// Summary of a completed cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    /// The text that was delivered. Empty when there was nothing to report.
    pub message: String,
    pub orders_seen: usize,
    pub added: Vec<Order>,
    pub shipped: Vec<Order>,
    pub reappeared: Vec<OrderId>,
    pub duplicate_removals: Vec<OrderId>,
    pub expired: Vec<OrderId>,
    pub tombstone_count: usize,
}

impl CycleReport {
    pub fn has_news(&self) -> bool {
        !self.message.is_empty()
    }
}
