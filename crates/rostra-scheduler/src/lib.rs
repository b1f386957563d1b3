//! # rostra-scheduler — Escalation Batch Driver
//!
//! Periodically fetches every `pending` broadcast record, runs the rule
//! evaluator, applies at most one rule per record per tick, and writes the
//! result back through the store's optimistic concurrency control. Each
//! committed event is handed to an [`EventSink`] — the seam where the
//! notification dispatcher (partner notification, supervisor alerting)
//! reacts; delivery itself is not this crate's business.
//!
//! ## Concurrency
//!
//! Several scheduler instances may evaluate the same record at once. No
//! locks are taken: the store's version compare-and-swap commits exactly
//! one writer, and the loser re-fetches and re-evaluates, at which point
//! the history already shows the rule as applied. The per-threshold
//! at-most-once guarantee is structural.
//!
//! ## Expiry
//!
//! No escalation rule forces `expired`; passing the response deadline is
//! an out-of-band transition. Deployments that want the driver to perform
//! it opt in via [`SchedulerConfig::expire_past_deadline`].

pub mod escalator;
pub mod sink;

pub use escalator::{Escalator, SchedulerConfig, TickSummary};
pub use sink::{ChannelSink, EventSink, LogSink};
