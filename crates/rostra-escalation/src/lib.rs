//! # rostra-escalation — Shift-Coverage Escalation Engine
//!
//! Tracks an unfilled shift that has been broadcast to external staffing
//! partners and automatically tightens urgency, widens the notified partner
//! pool, and extends or enforces the response deadline as time passes
//! without coverage.
//!
//! ## Components
//!
//! - **Record** (`record.rs`): `BroadcastRecord`, the per-shift lifecycle
//!   value with its append-only `EscalationHistory`.
//! - **Events** (`event.rs`): `EscalationEvent`, a tagged sum type per event
//!   kind. Illegal field combinations are unrepresentable.
//! - **Rules** (`rule.rs`): `EscalationRule` / `RuleSet`, configuration
//!   entities validated at construction and never mutated at runtime.
//! - **Evaluator** (`evaluator.rs`): `select_next_rule()`, a pure function
//!   choosing the single next applicable rule for a record.
//! - **Applier** (`applier.rs`): `apply()`, producing a new record version
//!   plus exactly one appended history event.
//! - **Deadline** (`deadline.rs`): `time_remaining()`, remaining/overdue
//!   minutes and display text against the response deadline.
//! - **Clock** (`clock.rs`): injected time source for the batch driver and
//!   for tests.
//!
//! ## Design
//!
//! The engine is a pure function over the records it is given. Evaluation
//! and application never perform I/O, never block, and never mutate in
//! place: `apply()` returns a fresh record value with one more history
//! event, which is what makes optimistic-concurrency persistence viable in
//! the batch driver.
//!
//! Idempotency is structural, not lock-based. Every applied rule is tagged
//! into the history by its stable `RuleId`; a rule whose id already appears
//! in history is never selected again, so redundant evaluation passes over
//! the same record are harmless.

pub mod applier;
pub mod clock;
pub mod deadline;
pub mod evaluator;
pub mod event;
pub mod record;
pub mod rule;

// ─── Record re-exports ──────────────────────────────────────────────

pub use record::{
    BroadcastRecord, BroadcastRequest, BroadcastStatus, PartnerResponse, ResponseScore,
    ResponseStatus, Urgency,
};

// ─── Event re-exports ───────────────────────────────────────────────

pub use event::{EscalationEvent, EscalationEventKind, EscalationHistory};

// ─── Rule re-exports ────────────────────────────────────────────────

pub use rule::{EscalationRule, RuleAction, RuleActionKind, RuleConfig, RuleSet, RuleSetConfig};

// ─── Engine re-exports ──────────────────────────────────────────────

pub use applier::apply;
pub use clock::{Clock, ManualClock, SystemClock};
pub use deadline::{time_remaining, TimeRemaining};
pub use evaluator::select_next_rule;
