//! # Order-state reconciliation
//!
//! Pure functions that turn the previous snapshot and the freshly listed orders into a classified [`OrderDiff`] and
//! the next tombstone set. Nothing in here performs I/O.
//!
//! * [`diff`] classifies two order sets into added, removed and shipped orders.
//! * [`reconcile`] applies the tombstone policy on top of [`diff`]:
//!   - removals are recorded silently as tombstones instead of being reported,
//!   - orders that come back after being tombstoned are not reported as new,
//!   - orders that ship after being tombstoned are reported as shipped and leave the tombstone set.
//!
//! The marketplace has been observed to transiently omit legitimate orders before they ship, so a disappearance is
//! only ever treated as provisional.
//!
//! [`OrderDiff`]: crate::order_types::OrderDiff
mod diff;
mod reconcile;
mod tombstones;

pub use diff::diff;
pub use reconcile::{reconcile, Reconciliation};
pub use tombstones::TombstonePolicy;
