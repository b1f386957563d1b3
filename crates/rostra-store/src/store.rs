//! # Store Trait and Errors
//!
//! Contract between the escalation engine's drivers (scheduler, API, CLI)
//! and whatever holds the active broadcast records.

use thiserror::Error;

use rostra_core::BroadcastId;
use rostra_escalation::BroadcastRecord;

/// Errors surfaced by a broadcast record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The record's version no longer matches the stored one; a concurrent
    /// writer committed first. Re-fetch and re-evaluate.
    #[error("version conflict on {id}: expected {expected}, stored {stored}")]
    Conflict {
        /// The contended record.
        id: BroadcastId,
        /// Version the caller based its update on.
        expected: u64,
        /// Version currently stored.
        stored: u64,
    },

    /// No record with the given id exists.
    #[error("broadcast {0} not found")]
    NotFound(BroadcastId),

    /// A record with the given id already exists.
    #[error("broadcast {0} already exists")]
    AlreadyExists(BroadcastId),

    /// Backend failure (connection, serialization, corruption).
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether this error is a CAS conflict the caller should resolve by
    /// re-fetching and re-evaluating.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// A store of broadcast records with optimistic concurrency control.
///
/// Implementations must guarantee that `update()` commits a record only
/// when the caller's `version` equals the stored version, bumping the
/// stored version by one atomically with the write. Everything else about
/// the backend (tables, serialization, caching) is its own business.
pub trait BroadcastStore: Send + Sync {
    /// All records currently in `pending` status, any order.
    fn fetch_pending(&self) -> Result<Vec<BroadcastRecord>, StoreError>;

    /// Fetch one record by id.
    fn get(&self, id: &BroadcastId) -> Result<Option<BroadcastRecord>, StoreError>;

    /// All records, for reporting surfaces. Terminal records included.
    fn fetch_all(&self) -> Result<Vec<BroadcastRecord>, StoreError>;

    /// Insert a new record at its current version.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` when the id is taken.
    fn insert(&self, record: BroadcastRecord) -> Result<(), StoreError>;

    /// Commit an updated record via compare-and-swap on its version.
    ///
    /// On success the stored version is `record.version + 1` and the
    /// committed record is returned. On conflict the stored record is
    /// untouched.
    ///
    /// # Errors
    ///
    /// `Conflict` when a concurrent writer committed first; `NotFound`
    /// when the record was never inserted.
    fn update(&self, record: BroadcastRecord) -> Result<BroadcastRecord, StoreError>;
}
