use std::fmt::Debug;

use chrono::Utc;
use log::*;
use tokio::sync::Mutex;

use crate::{
    formatter::format_diff,
    order_types::Snapshot,
    ow_api::{
        cycle_objects::{CycleReport, WatchOptions},
        delivery::deliver_message,
        errors::CycleError,
    },
    reconciler::reconcile,
    traits::{Notifier, OrderSource, SnapshotStore},
};

/// `OrderWatchApi` runs order watch cycles against an explicitly supplied snapshot store, order source and notifier.
pub struct OrderWatchApi<S, O, N> {
    store: S,
    source: O,
    notifier: N,
    options: WatchOptions,
    cycle_lock: Mutex<()>,
}

impl<S, O, N> Debug for OrderWatchApi<S, O, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderWatchApi ({:?})", self.options)
    }
}

impl<S, O, N> OrderWatchApi<S, O, N> {
    pub fn new(store: S, source: O, notifier: N, options: WatchOptions) -> Self {
        Self { store, source, notifier, options, cycle_lock: Mutex::new(()) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn source(&self) -> &O {
        &self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }
}

impl<S, O, N> OrderWatchApi<S, O, N>
where
    S: SnapshotStore,
    O: OrderSource,
    N: Notifier,
{
    /// Run one complete cycle: load the snapshot, list the current orders, reconcile, deliver the notification and
    /// persist the new snapshot.
    ///
    /// The snapshot is only written once everything else has succeeded. If listing orders, fetching line items or
    /// delivering the notification fails, the previous snapshot remains authoritative and the same changes will be
    /// picked up again on the next cycle.
    ///
    /// Cycles are serialised within this instance. Instances in different processes sharing one store are not
    /// coordinated; the trigger mechanism must ensure only one runs at a time.
    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        let _guard = self.cycle_lock.lock().await;
        let now = Utc::now();
        info!("🔄️ Starting order watch cycle at {now}");
        let snapshot = match self.store.get().await? {
            Some(s) => s,
            None => {
                info!("🔄️ No snapshot found. Assuming this is the first run.");
                Snapshot::default()
            },
        };
        let updated_after = self.options.order_window.updated_after(now);
        let orders = self.source.list_orders(&self.options.marketplace_id, updated_after).await?;
        debug!(
            "🔄️ {} orders listed (previously {}, {} tombstones)",
            orders.len(),
            snapshot.saved_orders.len(),
            snapshot.deleted_orders.len()
        );

        let reconciliation = reconcile(&snapshot, &orders, now, &self.options.tombstones);
        let message = format_diff(&reconciliation.diff, &self.source, &self.options.format).await?;
        deliver_message(&self.notifier, &message).await?;

        let report = CycleReport {
            started_at: now,
            message,
            orders_seen: orders.len(),
            added: reconciliation.diff.added,
            shipped: reconciliation.diff.shipped,
            reappeared: reconciliation.reappeared,
            duplicate_removals: reconciliation.duplicate_removals,
            expired: reconciliation.expired,
            tombstone_count: reconciliation.tombstones.len(),
        };
        let next = Snapshot { saved_orders: orders, last_update_time: now, deleted_orders: reconciliation.tombstones };
        self.store.set(&next).await?;
        info!(
            "🔄️ Cycle complete. {} new, {} shipped, {} reappeared, {} tombstones",
            report.added.len(),
            report.shipped.len(),
            report.reappeared.len(),
            report.tombstone_count
        );
        Ok(report)
    }
}
