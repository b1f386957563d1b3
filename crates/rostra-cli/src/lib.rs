//! # rostra-cli — Coverage Stack Command-Line Interface
//!
//! Operational tooling around the escalation engine.
//!
//! ## Subcommands
//!
//! - `rules` — validate a tenant rule-set configuration file
//! - `simulate` — drive one broadcast through a rule set on a manual
//!   clock and print the escalation timeline
//! - `serve` — run the scheduler loop and the read-only API together
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates — no escalation logic
//!   lives here.

pub mod rules;
pub mod serve;
pub mod simulate;
