//! Domain types shared by the reconciliation engine, the formatter and the persisted snapshot.
use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//--------------------------------------      OrderId        ---------------------------------------------------------
/// The marketplace's identity key for an order. Opaque, unique, and stable for the lifetime of the order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for OrderId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

//--------------------------------------    OrderStatus      ---------------------------------------------------------
/// Fulfilment status of an order. The engine only cares whether an order is [`OrderStatus::Shipped`] or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Unshipped,
    PartiallyShipped,
    Shipped,
    Canceled,
    Unfulfillable,
    InvoiceUnconfirmed,
    PendingAvailability,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn is_shipped(&self) -> bool {
        matches!(self, Self::Shipped)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::Unshipped => "Unshipped",
            Self::PartiallyShipped => "PartiallyShipped",
            Self::Shipped => "Shipped",
            Self::Canceled => "Canceled",
            Self::Unfulfillable => "Unfulfillable",
            Self::InvoiceUnconfirmed => "InvoiceUnconfirmed",
            Self::PendingAvailability => "PendingAvailability",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Parsing never fails. Statuses this build does not know about map to [`OrderStatus::Unknown`], which is treated
/// like any other non-shipped status.
impl FromStr for OrderStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "unshipped" => Self::Unshipped,
            "partiallyshipped" => Self::PartiallyShipped,
            "shipped" => Self::Shipped,
            "canceled" | "cancelled" => Self::Canceled,
            "unfulfillable" => Self::Unfulfillable,
            "invoiceunconfirmed" => Self::InvoiceUnconfirmed,
            "pendingavailability" => Self::PendingAvailability,
            _ => Self::Unknown,
        };
        Ok(status)
    }
}

//--------------------------------------       Order         ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub currency_code: String,
    /// Decimal amount, exactly as reported by the marketplace
    pub amount: String,
}

impl Money {
    pub fn new<S: Into<String>>(currency_code: S, amount: S) -> Self {
        Self { currency_code: currency_code.into(), amount: amount.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingLocation {
    pub city: Option<String>,
    pub region: Option<String>,
    pub country_code: Option<String>,
}

/// An order as observed in the marketplace. Orders are immutable value payloads: the engine never edits one, it only
/// decides which collection it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub total: Option<Money>,
    #[serde(default)]
    pub shipping: Option<ShippingLocation>,
    #[serde(default)]
    pub purchased_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new<I: Into<OrderId>>(id: I, status: OrderStatus) -> Self {
        Self { id: id.into(), status, ..Default::default() }
    }

    pub fn with_total(mut self, total: Money) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_shipping(mut self, shipping: ShippingLocation) -> Self {
        self.shipping = Some(shipping);
        self
    }

    pub fn is_shipped(&self) -> bool {
        self.status.is_shipped()
    }
}

/// A single line of an order. Only the title is used for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineItem {
    pub title: String,
    pub quantity: u32,
}

impl LineItem {
    pub fn new<S: Into<String>>(title: S, quantity: u32) -> Self {
        Self { title: title.into(), quantity }
    }
}

//--------------------------------------      OrderDiff      ---------------------------------------------------------
/// The classified changes between two order sets. An order id appears in at most one of the three lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OrderDiff {
    pub added: Vec<Order>,
    pub removed: Vec<Order>,
    pub shipped: Vec<Order>,
}

impl OrderDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.shipped.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.shipped.len()
    }
}

//--------------------------------------      Snapshot       ---------------------------------------------------------
/// A retained record of an order that is no longer observed in the marketplace.
///
/// Older snapshots stored the bare order without a date. Those still load, dated at the UNIX epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredTombstone")]
pub struct Tombstone {
    pub order: Order,
    /// The start of the first cycle in which the order was missing.
    pub tombstoned_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTombstone {
    Dated {
        order: Order,
        #[serde(default = "epoch", rename = "tombstonedAt")]
        tombstoned_at: DateTime<Utc>,
    },
    Bare(Order),
}

impl From<StoredTombstone> for Tombstone {
    fn from(value: StoredTombstone) -> Self {
        match value {
            StoredTombstone::Dated { order, tombstoned_at } => Self { order, tombstoned_at },
            StoredTombstone::Bare(order) => Self { order, tombstoned_at: epoch() },
        }
    }
}

impl Tombstone {
    pub fn new(order: Order, tombstoned_at: DateTime<Utc>) -> Self {
        Self { order, tombstoned_at }
    }
}

pub type Tombstones = BTreeMap<OrderId, Tombstone>;

/// The durable state carried between cycles. Read once at the start of a cycle and written once at the end.
///
/// Every field has a default, so a document with missing fields still loads: an empty order list, an empty tombstone
/// set and the UNIX epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub saved_orders: Vec<Order>,
    #[serde(default = "epoch")]
    pub last_update_time: DateTime<Utc>,
    #[serde(default)]
    pub deleted_orders: Tombstones,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self { saved_orders: Vec::new(), last_update_time: epoch(), deleted_orders: Tombstones::new() }
    }
}

/// `DateTime<Utc>::default()` is the UNIX epoch.
fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}
