//! Order Watch Engine
//!
//! The Order Watch Engine reconciles the orders of a marketplace seller account against the orders it saw on the
//! previous run, and produces a human-readable summary of what changed: new orders, orders that disappeared from the
//! listing, and orders that shipped. It is provider-agnostic: the marketplace, the message channel and the snapshot
//! storage are all injected through the traits in [`mod@traits`].
//!
//! The library is divided into the following sections:
//! 1. The reconciliation core ([`mod@reconciler`]). Pure functions that classify changes between two order sets and
//!    maintain the set of tombstoned (removed) orders, so that a removal is only ever reported once.
//! 2. Message formatting ([`mod@formatter`] and [`mod@helpers`]). Turns an [`order_types::OrderDiff`] into the
//!    notification text, and splits it into chunks that fit the delivery channel.
//! 3. Snapshot storage. Currently SQLite is the only supported backend ([`SqliteSnapshotStore`]).
//! 4. The public API ([`OrderWatchApi`]), which ties the above together into a single fetch-reconcile-notify-persist
//!    cycle.
mod db;

pub mod formatter;
pub mod helpers;
pub mod order_types;
mod ow_api;
pub mod reconciler;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{
    db::{SqliteSnapshotStore, SNAPSHOT_KEY},
    SqliteDatabaseError,
};
pub use ow_api::{
    cycle_objects::{
        CycleReport,
        OrderWindow,
        WatchOptions,
        DEFAULT_MARKETPLACE_ID,
        DEFAULT_ORDER_LOOKBACK_DAYS,
    },
    delivery::deliver_message,
    errors::CycleError,
    order_watch_api::OrderWatchApi,
};
