//! Per-contact execution lanes.
//!
//! Notifications for the same contact must be applied as a strictly
//! ordered sequence (the transcript update is an unversioned
//! read-modify-write), while notifications for different contacts may
//! proceed fully in parallel. A single global lock would serialize
//! unrelated contacts, so each contact gets its own lane: a lazily
//! created `tokio::sync::Mutex` whose waiters wake in arrival order.
//!
//! Lanes are garbage-collected once idle so the map does not grow with
//! every contact ever seen.

use deskrelay_core::ContactId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Keyed mutual exclusion: one lock per contact id.
#[derive(Debug, Default)]
pub struct ContactLanes {
    lanes: Mutex<HashMap<ContactId, Arc<tokio::sync::Mutex<()>>>>,
}

impl ContactLanes {
    /// Creates an empty lane map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lane for a contact, creating it on first use.
    ///
    /// Callers hold the returned lock for the whole read-modify-write and
    /// call [`collect`](Self::collect) after dropping their handle.
    #[must_use]
    pub fn lane(&self, id: &ContactId) -> Arc<tokio::sync::Mutex<()>> {
        let mut lanes = self.lanes.lock().unwrap();
        lanes.entry(id.clone()).or_default().clone()
    }

    /// Drops a contact's lane if nobody holds or awaits it.
    ///
    /// A lane still referenced outside the map (a holder, or a waiter
    /// queued behind one) is kept; the strong count cannot change while
    /// the map lock is held, because every handle is minted through
    /// [`lane`](Self::lane).
    pub fn collect(&self, id: &ContactId) {
        let mut lanes = self.lanes.lock().unwrap();
        if let Some(lane) = lanes.get(id)
            && Arc::strong_count(lane) == 1
        {
            lanes.remove(id);
        }
    }

    /// Number of live lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.lock().unwrap().len()
    }

    /// Whether no lanes are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_contact_gets_the_same_lane() {
        let lanes = ContactLanes::new();
        let id = ContactId::new("9051");
        let first = lanes.lane(&id);
        let second = lanes.lane(&id);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(lanes.len(), 1);
    }

    #[test]
    fn different_contacts_get_different_lanes() {
        let lanes = ContactLanes::new();
        let first = lanes.lane(&ContactId::new("9051"));
        let second = lanes.lane(&ContactId::new("9052"));
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(lanes.len(), 2);
    }

    #[test]
    fn idle_lane_is_collected() {
        let lanes = ContactLanes::new();
        let id = ContactId::new("9051");
        let lane = lanes.lane(&id);
        drop(lane);
        lanes.collect(&id);
        assert!(lanes.is_empty());
    }

    #[test]
    fn held_lane_survives_collection() {
        let lanes = ContactLanes::new();
        let id = ContactId::new("9051");
        let lane = lanes.lane(&id);
        lanes.collect(&id);
        assert_eq!(lanes.len(), 1);
        drop(lane);
        lanes.collect(&id);
        assert!(lanes.is_empty());
    }

    #[tokio::test]
    async fn distinct_lanes_do_not_block_each_other() {
        let lanes = ContactLanes::new();
        let slow = lanes.lane(&ContactId::new("9051"));
        let _held = slow.lock().await;

        let fast = lanes.lane(&ContactId::new("9052"));
        // Must acquire immediately even while the other lane is held.
        let guard = fast.try_lock();
        assert!(guard.is_ok());
    }
}
