use chrono::{DateTime, Utc};
use log::*;
use order_watch_engine::{
    order_types::{LineItem, Money, Order, OrderId, OrderStatus, ShippingLocation},
    traits::{OrderSource, OrderSourceError},
};
use sp_api_tools::{SpAddress, SpApi, SpApiError, SpOrder, SpOrderItem};

/// An [`OrderSource`] backed by the SP-API Orders API.
#[derive(Clone)]
pub struct AmazonOrderSource {
    api: SpApi,
}

impl AmazonOrderSource {
    pub fn new(api: SpApi) -> Self {
        Self { api }
    }
}

impl OrderSource for AmazonOrderSource {
    async fn list_orders(
        &self,
        marketplace_id: &str,
        updated_after: DateTime<Utc>,
    ) -> Result<Vec<Order>, OrderSourceError> {
        let orders = self.api.list_orders(&[marketplace_id], updated_after).await.map_err(source_error)?;
        trace!("🛒️ {} orders received from SP-API", orders.len());
        Ok(orders.into_iter().map(order_from_sp_order).collect())
    }

    async fn list_order_items(&self, order_id: &OrderId) -> Result<Vec<LineItem>, OrderSourceError> {
        let items = self.api.list_order_items(order_id.as_str()).await.map_err(source_error)?;
        Ok(items.into_iter().map(line_item_from_sp_order_item).collect())
    }
}

fn source_error(e: SpApiError) -> OrderSourceError {
    if e.is_throttled() {
        warn!("🛒️ SP-API is throttling requests. {e}");
        return OrderSourceError::Throttled(e.to_string());
    }
    match e {
        SpApiError::JsonError(_) | SpApiError::EmptyResponse => OrderSourceError::InvalidData(e.to_string()),
        _ => OrderSourceError::Unavailable(e.to_string()),
    }
}

pub fn order_from_sp_order(value: SpOrder) -> Order {
    let status = value.order_status.parse::<OrderStatus>().unwrap_or(OrderStatus::Unknown);
    if status == OrderStatus::Unknown {
        debug!("🛒️ Order {} has an unrecognised status: {}", value.amazon_order_id, value.order_status);
    }
    Order {
        id: OrderId::from(value.amazon_order_id),
        status,
        total: value.order_total.map(|t| Money::new(t.currency_code, t.amount)),
        shipping: value.shipping_address.map(shipping_location),
        purchased_at: value.purchase_date,
        last_updated_at: value.last_update_date,
    }
}

fn shipping_location(address: SpAddress) -> ShippingLocation {
    ShippingLocation { city: address.city, region: address.state_or_region, country_code: address.country_code }
}

pub fn line_item_from_sp_order_item(value: SpOrderItem) -> LineItem {
    LineItem::new(value.title, value.quantity_ordered)
}
