use std::collections::{BTreeMap, BTreeSet};

use crate::order_types::{Order, OrderDiff, OrderId};

/// Classify the differences between two order sets.
///
/// * An id only in `new_orders` is `added`.
/// * An id in both, whose status changed to shipped, is `shipped`.
/// * An id only in `old_orders` is `removed`.
///
/// Each list keeps the order of the input sequence it was drawn from. Ids are expected to be unique within each
/// input; if one is repeated anyway, it is reported at most once, using the last record seen for it.
pub fn diff(old_orders: &[Order], new_orders: &[Order]) -> OrderDiff {
    let old_by_id = by_id(old_orders);
    let new_by_id = by_id(new_orders);
    let mut result = OrderDiff::default();

    let mut seen = BTreeSet::new();
    for id in new_orders.iter().map(|o| &o.id) {
        if !seen.insert(id) {
            continue;
        }
        let new_order = new_by_id[id];
        match old_by_id.get(id) {
            None => result.added.push(new_order.clone()),
            Some(old_order) if new_order.is_shipped() && !old_order.is_shipped() => {
                result.shipped.push(new_order.clone())
            },
            Some(_) => {},
        }
    }

    let mut seen = BTreeSet::new();
    for id in old_orders.iter().map(|o| &o.id) {
        if seen.insert(id) && !new_by_id.contains_key(id) {
            result.removed.push(old_by_id[id].clone());
        }
    }
    result
}

fn by_id(orders: &[Order]) -> BTreeMap<&OrderId, &Order> {
    orders.iter().map(|o| (&o.id, o)).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::order_types::OrderStatus::{Canceled, Pending, Shipped, Unshipped};

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn new_shipped_and_added() {
        let old = vec![Order::new("A", Unshipped)];
        let new = vec![Order::new("A", Shipped), Order::new("B", Unshipped)];
        let diff = diff(&old, &new);
        assert_eq!(ids(&diff.added), vec!["B"]);
        assert_eq!(ids(&diff.shipped), vec!["A"]);
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn disjoint_sets() {
        let old = vec![Order::new("A", Unshipped), Order::new("B", Shipped)];
        let new = vec![Order::new("C", Pending), Order::new("D", Shipped)];
        let diff = diff(&old, &new);
        assert_eq!(ids(&diff.added), vec!["C", "D"]);
        assert_eq!(ids(&diff.removed), vec!["A", "B"]);
        assert!(diff.shipped.is_empty());
    }

    #[test]
    fn already_shipped_is_not_reported_again() {
        let old = vec![Order::new("A", Shipped)];
        let new = vec![Order::new("A", Shipped)];
        assert!(diff(&old, &new).is_empty());
    }

    #[test]
    fn other_status_changes_are_ignored() {
        let old = vec![Order::new("A", Pending), Order::new("B", Shipped)];
        let new = vec![Order::new("A", Canceled), Order::new("B", Unshipped)];
        assert!(diff(&old, &new).is_empty());
    }

    #[test]
    fn input_order_is_preserved() {
        let new = vec![Order::new("Z", Pending), Order::new("A", Pending), Order::new("M", Pending)];
        let diff = diff(&[], &new);
        assert_eq!(ids(&diff.added), vec!["Z", "A", "M"]);
    }

    #[test]
    fn duplicate_ids_are_reported_once() {
        let new = vec![Order::new("A", Pending), Order::new("A", Shipped)];
        let diff = diff(&[], &new);
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].status, Shipped);
    }
}
