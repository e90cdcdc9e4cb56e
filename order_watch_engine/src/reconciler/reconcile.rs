use chrono::{DateTime, Utc};
use log::*;

use super::{diff::diff, TombstonePolicy};
use crate::order_types::{Order, OrderDiff, OrderId, Snapshot, Tombstone, Tombstones};

/// The outcome of reconciling a snapshot against the current order set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// The changes that should be reported. `removed` is always empty: removals are recorded as tombstones instead.
    pub diff: OrderDiff,
    /// The tombstone set to persist with the next snapshot.
    pub tombstones: Tombstones,
    /// Orders that disappeared while already holding a tombstone. The existing tombstone is kept.
    pub duplicate_removals: Vec<OrderId>,
    /// Tombstoned orders that were listed again without having shipped, and therefore not reported at all.
    pub reappeared: Vec<OrderId>,
    /// Tombstones evicted by the [`TombstonePolicy`].
    pub expired: Vec<OrderId>,
}

/// Reconcile the previous snapshot against `new_orders`.
///
/// The policy is applied as a pipeline of steps, each taking the output of the previous one:
/// 1. [`diff`] the saved orders against the new ones.
/// 2. Removed orders become tombstones and are not reported.
/// 3. Added orders that hold a tombstone have reappeared and leave the tombstone set. If the order has shipped since it
///    was tombstoned it is reported as shipped, otherwise it is not reported.
/// 4. Shipped orders that hold a tombstone leave the tombstone set. They are still reported as shipped.
/// 5. Tombstones that have outlived the policy's maximum age are evicted.
///
/// `now` is the start of the current cycle and is used to date new tombstones.
pub fn reconcile(
    snapshot: &Snapshot,
    new_orders: &[Order],
    now: DateTime<Utc>,
    policy: &TombstonePolicy,
) -> Reconciliation {
    let OrderDiff { added, removed, mut shipped } = diff(&snapshot.saved_orders, new_orders);
    let tombstones = snapshot.deleted_orders.clone();
    let (tombstones, duplicate_removals) = record_removals(removed, tombstones, now);
    let Reappearances { added, shipped_since_removal, tombstones, reappeared } = drop_reappeared(added, tombstones);
    shipped.extend(shipped_since_removal);
    let tombstones = clear_shipped(&shipped, tombstones);
    let (tombstones, expired) = policy.evict_expired(tombstones, now);
    debug!(
        "🔁️ Reconciled {} orders: {} new, {} shipped, {} reappeared, {} tombstones",
        new_orders.len(),
        added.len(),
        shipped.len(),
        reappeared.len(),
        tombstones.len()
    );
    Reconciliation {
        diff: OrderDiff { added, removed: Vec::new(), shipped },
        tombstones,
        duplicate_removals,
        reappeared,
        expired,
    }
}

fn record_removals(
    removed: Vec<Order>,
    mut tombstones: Tombstones,
    now: DateTime<Utc>,
) -> (Tombstones, Vec<OrderId>) {
    let mut duplicates = Vec::new();
    for order in removed {
        if tombstones.contains_key(&order.id) {
            warn!("🪦️ Order {} was removed again, but it already has a tombstone. Keeping the original.", order.id);
            duplicates.push(order.id);
        } else {
            debug!("🪦️ Order {} is no longer listed. Recording a tombstone.", order.id);
            tombstones.insert(order.id.clone(), Tombstone::new(order, now));
        }
    }
    (tombstones, duplicates)
}

struct Reappearances {
    added: Vec<Order>,
    shipped_since_removal: Vec<Order>,
    tombstones: Tombstones,
    reappeared: Vec<OrderId>,
}

fn drop_reappeared(added: Vec<Order>, mut tombstones: Tombstones) -> Reappearances {
    let mut reappeared = Vec::new();
    let mut shipped_since_removal = Vec::new();
    let mut still_added = Vec::with_capacity(added.len());
    for order in added {
        match tombstones.remove(&order.id) {
            Some(tombstone) if order.is_shipped() && !tombstone.order.is_shipped() => {
                debug!("🪦️ Tombstoned order {} is back and has shipped. Removing its tombstone.", order.id);
                shipped_since_removal.push(order);
            },
            Some(_) => {
                debug!("🪦️ Order {} has reappeared. Removing its tombstone.", order.id);
                reappeared.push(order.id);
            },
            None => still_added.push(order),
        }
    }
    Reappearances { added: still_added, shipped_since_removal, tombstones, reappeared }
}

fn clear_shipped(shipped: &[Order], mut tombstones: Tombstones) -> Tombstones {
    for order in shipped {
        if tombstones.remove(&order.id).is_some() {
            debug!("🪦️ Tombstoned order {} has shipped. Removing its tombstone.", order.id);
        }
    }
    tombstones
}
