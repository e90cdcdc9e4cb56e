use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An order as returned by the SP-API Orders API (`getOrders`). Only the fields an order watcher needs are mapped;
/// everything else in the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpOrder {
    pub amazon_order_id: String,
    pub purchase_date: Option<DateTime<Utc>>,
    pub last_update_date: Option<DateTime<Utc>>,
    pub order_status: String,
    pub order_total: Option<SpMoney>,
    pub shipping_address: Option<SpAddress>,
    pub number_of_items_shipped: Option<u32>,
    pub number_of_items_unshipped: Option<u32>,
    pub marketplace_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpMoney {
    pub currency_code: String,
    pub amount: String,
}

/// Shipping address. Since 2021 most PII fields are restricted, so in practice only the city, region and country are
/// populated.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpAddress {
    pub city: Option<String>,
    pub state_or_region: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpOrderItem {
    #[serde(rename = "ASIN")]
    pub asin: String,
    pub order_item_id: String,
    pub seller_sku: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub quantity_ordered: u32,
    pub quantity_shipped: Option<u32>,
    pub item_price: Option<SpMoney>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct OrdersList {
    #[serde(default)]
    pub orders: Vec<SpOrder>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct OrderItemsList {
    #[serde(default)]
    pub order_items: Vec<SpOrderItem>,
    pub next_token: Option<String>,
}

/// The standard SP-API response envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SpResponse<T> {
    pub payload: Option<T>,
    #[serde(default)]
    pub errors: Vec<SpErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SpErrorDetail {
    pub code: String,
    #[serde(default)]
    pub message: String,
    pub details: Option<String>,
}

impl SpErrorDetail {
    pub fn describe(&self) -> String {
        match &self.details {
            Some(d) if !d.is_empty() => format!("{}: {} ({d})", self.code, self.message),
            _ => format!("{}: {}", self.code, self.message),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AccessTokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}
