//! # rostra-store — Broadcast Record Store Seam
//!
//! The escalation engine is a pure function over the records it is given;
//! this crate owns the seam to wherever those records live. Persistence
//! technology is deliberately out of scope — `BroadcastStore` is a small
//! dyn-safe trait, and the shipped implementation is an in-memory map used
//! by tests, the CLI simulator, and the demo API.
//!
//! ## Optimistic Concurrency
//!
//! Idempotency in the engine is derived from history content, so two
//! scheduler instances can both decide to apply the same rule before
//! either writes back. The store is where exactly-one-of-them wins:
//! `update()` compares the caller's record version against the stored one
//! and rejects the stale write with [`StoreError::Conflict`]. The loser
//! re-fetches and re-evaluates; the refreshed record shows the rule as
//! already applied and the pass becomes a no-op.

pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::{BroadcastStore, StoreError};
