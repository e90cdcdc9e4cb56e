//! # Order watch public API
//!
//! The `ow_api` module exposes the programmatic API for running order watch cycles.
//!
//! * [`order_watch_api`] runs a complete cycle: fetch, reconcile, notify, persist.
//! * [`delivery`] splits a notification into channel-sized chunks and hands them to a [`Notifier`].
//! * [`cycle_objects`] holds the options and result types used by the cycle.
//!
//! # API usage
//!
//! An API instance is created by supplying the three collaborators the cycle needs. Any types implementing the
//! collaborator traits will do, which is how the tests swap the network clients for in-memory fakes.
//!
//! ```rust,ignore
//! use order_watch_engine::{OrderWatchApi, SqliteSnapshotStore, WatchOptions};
//! let store = SqliteSnapshotStore::new_with_url("sqlite://data/order_watch.db", 5).await?;
//! let api = OrderWatchApi::new(store, order_source, notifier, WatchOptions::default());
//! let report = api.run_cycle().await?;
//! println!("{}", report.message);
//! ```
//!
//! [`Notifier`]: crate::traits::Notifier

pub mod cycle_objects;
pub mod delivery;
pub mod errors;
pub mod order_watch_api;
