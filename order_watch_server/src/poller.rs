use std::{sync::Arc, time::Duration};

use log::*;
use order_watch_engine::{
    traits::{Notifier, OrderSource, SnapshotStore},
    OrderWatchApi,
};
use tokio::{task::JoinHandle, time::MissedTickBehavior};

/// Starts the order poller. Do not await the returned JoinHandle, as it will run indefinitely.
///
/// The poller shares its API instance with the `/check` route, so polled and requested cycles never overlap. A failed
/// cycle is logged and retried on the next tick. This must be called from within the actix runtime.
pub fn start_order_poller<S, O, N>(
    api: Arc<OrderWatchApi<S, O, N>>,
    interval: Duration,
    run_immediately: bool,
) -> JoinHandle<()>
where
    S: SnapshotStore + 'static,
    O: OrderSource + 'static,
    N: Notifier + 'static,
{
    actix_web::rt::spawn(async move {
        let start = if run_immediately { tokio::time::Instant::now() } else { tokio::time::Instant::now() + interval };
        let mut timer = tokio::time::interval_at(start, interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("🕰️ Order poller started. Checking for orders every {}s", interval.as_secs());
        loop {
            timer.tick().await;
            info!("🕰️ Running scheduled order check");
            match api.run_cycle().await {
                Ok(report) if report.has_news() => {
                    info!(
                        "🕰️ Order check complete. {} new and {} shipped orders reported",
                        report.added.len(),
                        report.shipped.len()
                    );
                },
                Ok(_) => debug!("🕰️ Order check complete. Nothing to report"),
                Err(e) => {
                    error!("🕰️ Error running scheduled order check: {e}");
                },
            }
        }
    })
}
