//! # Collaborator contracts
//!
//! The engine itself performs no I/O. Everything it needs from the outside world is expressed through the traits in
//! this module, and concrete implementations are injected into [`crate::OrderWatchApi`].
//!
//! * [`SnapshotStore`] persists the [`crate::order_types::Snapshot`] between cycles. Single document, last write wins.
//! * [`OrderSource`] lists the current orders of a marketplace and the line items of a single order.
//! * [`Notifier`] delivers one chunk of a notification message. Chunking is done by the engine.
mod notifier;
mod order_source;
mod snapshot_store;

pub use notifier::{Notifier, NotifierError, DISCORD_CHARACTER_LIMIT};
pub use order_source::{OrderSource, OrderSourceError};
pub use snapshot_store::{SnapshotStore, SnapshotStoreError};
