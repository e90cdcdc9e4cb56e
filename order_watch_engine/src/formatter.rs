//! Turns an [`OrderDiff`] into the human-readable notification text.
use log::*;

use crate::{
    order_types::{LineItem, Order, OrderDiff, ShippingLocation},
    traits::{OrderSource, OrderSourceError},
};

pub const NEW_ORDERS_HEADER: &str = "🎊 New Orders 🎉";
pub const DELETED_ORDERS_HEADER: &str = "🛑 Deleted Orders 🗑";
pub const SHIPPED_ORDERS_HEADER: &str = "📦 Shipped Orders 🛫";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Shipping addresses in this country do not get the country code appended.
    pub domestic_country: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { domestic_country: "US".to_string() }
    }
}

/// Build the notification text for `diff`.
///
/// Non-empty categories are written in the order new, deleted, shipped. Each one gets a header, one `- ` line per
/// order, and a trailing blank line. The line items of every order are fetched from `source` one order at a time.
///
/// An empty diff produces an empty string.
pub async fn format_diff<O: OrderSource>(
    diff: &OrderDiff,
    source: &O,
    options: &FormatOptions,
) -> Result<String, OrderSourceError> {
    let mut msg = String::new();
    let sections =
        [(NEW_ORDERS_HEADER, &diff.added), (DELETED_ORDERS_HEADER, &diff.removed), (SHIPPED_ORDERS_HEADER, &diff.shipped)];
    for (header, orders) in sections {
        if orders.is_empty() {
            continue;
        }
        msg.push_str(header);
        msg.push('\n');
        for order in orders {
            trace!("📝️ Fetching line items for order {}", order.id);
            let items = source.list_order_items(&order.id).await?;
            msg.push_str("- ");
            msg.push_str(&format_order_line(order, &items, options));
            msg.push('\n');
        }
        msg.push('\n');
    }
    debug!("📝️ Formatted {} orders into a {} character message", diff.total_count(), msg.chars().count());
    Ok(msg)
}

/// `$<amount>: <title>, <title> in <city>, <region>[, <country>]`, leaving out whatever is unknown.
pub fn format_order_line(order: &Order, items: &[LineItem], options: &FormatOptions) -> String {
    let mut line = String::new();
    if let Some(total) = &order.total {
        line.push_str(&format!("${}: ", total.amount));
    }
    line.push_str(&items.iter().map(|i| i.title.as_str()).collect::<Vec<&str>>().join(", "));
    if let Some(suffix) = order.shipping.as_ref().and_then(|s| location_suffix(s, options)) {
        line.push_str(&suffix);
    }
    line
}

fn location_suffix(shipping: &ShippingLocation, options: &FormatOptions) -> Option<String> {
    let country = shipping
        .country_code
        .as_deref()
        .filter(|c| !c.trim().eq_ignore_ascii_case(options.domestic_country.trim()));
    let parts = [shipping.city.as_deref(), shipping.region.as_deref(), country]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>();
    if parts.is_empty() {
        None
    } else {
        Some(format!(" in {}", parts.join(", ")))
    }
}
