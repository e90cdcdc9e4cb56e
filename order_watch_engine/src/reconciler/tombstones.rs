use chrono::{DateTime, Duration, Utc};
use log::*;

use crate::order_types::{OrderId, Tombstones};

/// Governs how long a tombstone is retained.
///
/// With no `max_age` (the default) tombstones are kept until the order reappears or ships, which means orders that
/// are deleted for good accumulate forever. Setting a `max_age` evicts tombstones older than that. Note that an
/// order returning after its tombstone was evicted is reported as a new order again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TombstonePolicy {
    pub max_age: Option<Duration>,
}

impl TombstonePolicy {
    pub fn unbounded() -> Self {
        Self { max_age: None }
    }

    pub fn with_max_age(max_age: Duration) -> Self {
        Self { max_age: Some(max_age) }
    }

    pub fn is_expired(&self, tombstoned_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.max_age {
            Some(max_age) => now - tombstoned_at > max_age,
            None => false,
        }
    }

    /// Splits off the tombstones that have outlived `max_age`. Returns the retained set and the evicted ids.
    pub fn evict_expired(&self, tombstones: Tombstones, now: DateTime<Utc>) -> (Tombstones, Vec<OrderId>) {
        if self.max_age.is_none() {
            return (tombstones, Vec::new());
        }
        let (expired, retained): (Tombstones, Tombstones) =
            tombstones.into_iter().partition(|(_, t)| self.is_expired(t.tombstoned_at, now));
        let expired = expired.into_keys().collect::<Vec<OrderId>>();
        for id in &expired {
            info!("🪦️ Tombstone for order {id} has expired and was evicted");
        }
        (retained, expired)
    }
}
