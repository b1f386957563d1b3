//! # In-Memory Store
//!
//! Reference `BroadcastStore` backed by a mutex-guarded map. Used by the
//! test suites, the CLI simulator, and the demo API. The version
//! compare-and-swap is performed under the map lock, so it is atomic with
//! the write exactly as the trait requires.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use rostra_core::BroadcastId;
use rostra_escalation::{BroadcastRecord, BroadcastStatus};

use crate::store::{BroadcastStore, StoreError};

/// Mutex-guarded in-memory record map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<BroadcastId, BroadcastRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held, any status.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<BroadcastId, BroadcastRecord>> {
        // A poisoned lock means a writer panicked mid-update; the map
        // itself is still consistent because updates replace whole values.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BroadcastStore for MemoryStore {
    fn fetch_pending(&self) -> Result<Vec<BroadcastRecord>, StoreError> {
        Ok(self
            .lock()
            .values()
            .filter(|r| r.status == BroadcastStatus::Pending)
            .cloned()
            .collect())
    }

    fn get(&self, id: &BroadcastId) -> Result<Option<BroadcastRecord>, StoreError> {
        Ok(self.lock().get(id).cloned())
    }

    fn fetch_all(&self) -> Result<Vec<BroadcastRecord>, StoreError> {
        Ok(self.lock().values().cloned().collect())
    }

    fn insert(&self, record: BroadcastRecord) -> Result<(), StoreError> {
        let mut records = self.lock();
        if records.contains_key(&record.id) {
            return Err(StoreError::AlreadyExists(record.id.clone()));
        }
        debug!(id = %record.id, shift = %record.shift, "broadcast inserted");
        records.insert(record.id.clone(), record);
        Ok(())
    }

    fn update(&self, record: BroadcastRecord) -> Result<BroadcastRecord, StoreError> {
        let mut records = self.lock();
        let stored = records
            .get(&record.id)
            .ok_or_else(|| StoreError::NotFound(record.id.clone()))?;
        if stored.version != record.version {
            return Err(StoreError::Conflict {
                id: record.id.clone(),
                expected: record.version,
                stored: stored.version,
            });
        }
        let mut committed = record;
        committed.version += 1;
        debug!(id = %committed.id, version = committed.version, "broadcast updated");
        records.insert(committed.id.clone(), committed.clone());
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rostra_core::{LocationRef, ShiftRef, Timestamp};
    use rostra_escalation::{BroadcastRequest, Urgency};

    fn t0() -> Timestamp {
        Timestamp::parse("2026-08-06T08:00:00Z").unwrap()
    }

    fn record() -> BroadcastRecord {
        BroadcastRecord::open(BroadcastRequest {
            shift: ShiftRef::new("shift-41"),
            location: LocationRef::new("ward-b"),
            broadcasted_at: t0(),
            response_deadline: t0().plus_minutes(240),
            auto_escalate_at: None,
            urgency: Urgency::Standard,
            max_tiers: 3,
        })
        .unwrap()
    }

    #[test]
    fn test_insert_then_get() {
        let store = MemoryStore::new();
        let r = record();
        let id = r.id.clone();
        store.insert(r).unwrap();
        assert!(store.get(&id).unwrap().is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_double_insert_rejected() {
        let store = MemoryStore::new();
        let r = record();
        store.insert(r.clone()).unwrap();
        assert!(matches!(store.insert(r), Err(StoreError::AlreadyExists(_))));
    }

    #[test]
    fn test_fetch_pending_excludes_terminal() {
        let store = MemoryStore::new();
        store.insert(record()).unwrap();
        store.insert(record().fill(t0().plus_minutes(5))).unwrap();
        store.insert(record().cancel()).unwrap();
        assert_eq!(store.fetch_pending().unwrap().len(), 1);
        assert_eq!(store.fetch_all().unwrap().len(), 3);
    }

    #[test]
    fn test_update_bumps_version() {
        let store = MemoryStore::new();
        let r = record();
        store.insert(r.clone()).unwrap();
        let committed = store.update(r).unwrap();
        assert_eq!(committed.version, 1);
        let fetched = store.get(&committed.id).unwrap().unwrap();
        assert_eq!(fetched.version, 1);
    }

    #[test]
    fn test_stale_update_conflicts_and_leaves_store_untouched() {
        let store = MemoryStore::new();
        let r = record();
        let id = r.id.clone();
        store.insert(r.clone()).unwrap();

        // Two workers read the same version.
        let worker_a = store.get(&id).unwrap().unwrap();
        let worker_b = store.get(&id).unwrap().unwrap();

        // A commits first.
        let mut a = worker_a;
        a.urgency = Urgency::Urgent;
        store.update(a).unwrap();

        // B's write is stale.
        let mut b = worker_b;
        b.urgency = Urgency::Critical;
        let err = store.update(b).unwrap_err();
        assert!(err.is_conflict());

        // A's commit survived.
        let stored = store.get(&id).unwrap().unwrap();
        assert_eq!(stored.urgency, Urgency::Urgent);
        assert_eq!(stored.version, 1);
    }

    #[test]
    fn test_update_unknown_record_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.update(record()), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_conflict_loser_succeeds_after_refetch() {
        let store = MemoryStore::new();
        let r = record();
        let id = r.id.clone();
        store.insert(r).unwrap();

        let stale = store.get(&id).unwrap().unwrap();
        store.update(store.get(&id).unwrap().unwrap()).unwrap();
        assert!(store.update(stale).unwrap_err().is_conflict());

        // Refetch picks up the committed version; the retry commits.
        let fresh = store.get(&id).unwrap().unwrap();
        let committed = store.update(fresh).unwrap();
        assert_eq!(committed.version, 2);
    }
}
