//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the coverage stack. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! The escalation engine itself is total over well-formed input: once a
//! record and rule set are constructed, evaluation and application cannot
//! fail. All failure modes therefore live at the **construction boundary**
//! (`ValidationError`) or outside the engine (store I/O, serialization).

use thiserror::Error;

/// Top-level error type for the coverage stack.
#[derive(Error, Debug)]
pub enum RostraError {
    /// Record or rule-set construction rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Timestamp parsing or conversion failure.
    #[error("temporal error: {0}")]
    Temporal(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejection at the record/rule construction boundary.
///
/// These are the only errors the engine can produce. Evaluation and
/// application of validated values never fail — a surprising state (all
/// rules already applied, tier at ceiling) yields "no action", not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A broadcast record must start with `current_tier` in `[1, max_tiers]`.
    #[error("tier {tier} outside valid range [1, {max_tiers}]")]
    TierOutOfRange {
        /// The rejected starting tier.
        tier: u8,
        /// The configured tier ceiling.
        max_tiers: u8,
    },

    /// A broadcast must have at least one partner tier to notify.
    #[error("max_tiers must be at least 1")]
    NoTiers,

    /// Rule thresholds are elapsed-time offsets and cannot be negative.
    #[error("rule {rule_id}: trigger_after_minutes must be non-negative, got {minutes}")]
    NegativeTrigger {
        /// The offending rule.
        rule_id: String,
        /// The rejected threshold.
        minutes: i64,
    },

    /// An action parameter required by the rule's action kind is absent.
    #[error("rule {rule_id}: action {action:?} requires parameter {parameter:?}")]
    MissingParameter {
        /// The offending rule.
        rule_id: String,
        /// The configured action kind.
        action: String,
        /// The absent parameter name.
        parameter: String,
    },

    /// Deadline extensions must move the deadline forward.
    #[error("rule {rule_id}: extend_minutes must be positive, got {minutes}")]
    NonPositiveExtension {
        /// The offending rule.
        rule_id: String,
        /// The rejected extension.
        minutes: i64,
    },

    /// Rule ids tag applied rules in history and must be unique per set.
    #[error("duplicate rule id {rule_id:?} in rule set")]
    DuplicateRuleId {
        /// The duplicated identifier.
        rule_id: String,
    },

    /// Rule ids must be non-empty.
    #[error("rule id must be non-empty")]
    EmptyRuleId,
}
