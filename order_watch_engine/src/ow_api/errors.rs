use thiserror::Error;

use crate::traits::{NotifierError, OrderSourceError, SnapshotStoreError};

/// A failed cycle. Whatever the cause, the previously persisted snapshot is left untouched.
#[derive(Debug, Clone, Error)]
pub enum CycleError {
    #[error("Could not load or save the snapshot. {0}")]
    SnapshotStore(#[from] SnapshotStoreError),
    #[error("Could not fetch orders. {0}")]
    OrderSource(#[from] OrderSourceError),
    #[error("Could not deliver the notification. {0}")]
    Delivery(#[from] NotifierError),
}
