//! # rostra-core — Foundational Types for the Rostra Coverage Stack
//!
//! This crate is the bedrock of the Rostra workspace. It defines the
//! type-system primitives shared by every other crate: identifier newtypes,
//! the UTC-only `Timestamp`, and the error hierarchy. Every other crate in
//! the workspace depends on `rostra-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `BroadcastId`, `PartnerId`,
//!    `ShiftRef`, `LocationRef`, `RuleId` — no bare strings or UUIDs cross a
//!    crate boundary. You cannot pass a `PartnerId` where a `BroadcastId` is
//!    expected.
//!
//! 2. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision. Escalation thresholds are expressed in
//!    whole minutes, so `Timestamp` carries the minute arithmetic used by
//!    the rule evaluator and the deadline calculator.
//!
//! 3. **Validation at construction.** Identifiers and records are validated
//!    when built, never at evaluation time. Once a value exists, the engine
//!    treats it as well-formed.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rostra-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::{RostraError, ValidationError};
pub use identity::{BroadcastId, LocationRef, PartnerId, RuleId, ShiftRef};
pub use temporal::Timestamp;
