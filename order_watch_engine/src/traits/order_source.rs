use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::order_types::{LineItem, Order, OrderId};

/// The order source is unavailable or returned something unusable. Never recovered locally: it aborts the cycle.
#[derive(Debug, Clone, Error)]
pub enum OrderSourceError {
    #[error("The order source is unavailable. {0}")]
    Unavailable(String),
    #[error("The order source is throttling requests. {0}")]
    Throttled(String),
    #[error("The order source returned invalid data. {0}")]
    InvalidData(String),
}

#[allow(async_fn_in_trait)]
pub trait OrderSource {
    /// List every order in the given marketplace that was updated after `updated_after`.
    async fn list_orders(
        &self,
        marketplace_id: &str,
        updated_after: DateTime<Utc>,
    ) -> Result<Vec<Order>, OrderSourceError>;
    /// List the line items for the given order.
    async fn list_order_items(&self, order_id: &OrderId) -> Result<Vec<LineItem>, OrderSourceError>;
}
