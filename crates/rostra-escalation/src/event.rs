//! # Escalation Events and History
//!
//! Every change the engine makes to a broadcast record is recorded as an
//! `EscalationEvent` appended to the record's `EscalationHistory`. The
//! history is the audit trail: append-only, never edited, never truncated.
//!
//! Each event kind is a distinct variant carrying only the fields relevant
//! to that kind — there is no single struct with optional fields whose
//! combinations must be policed at runtime.
//!
//! The optional `rule_id` tags the configured rule that produced the event.
//! The rule evaluator treats a rule whose id already appears in history as
//! applied, which is what makes rule application idempotent under repeated
//! or concurrent evaluation passes. Events produced outside rule
//! application (initial broadcast, fill, expiry) carry no rule id.

use serde::{Deserialize, Serialize};

use rostra_core::{RuleId, Timestamp};

use crate::record::Urgency;

/// One entry in a broadcast record's escalation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationEvent {
    /// When the event occurred (UTC).
    pub at: Timestamp,
    /// The configured rule that produced this event, if any.
    pub rule_id: Option<RuleId>,
    /// What happened, with the before/after values relevant to that kind.
    #[serde(flatten)]
    pub kind: EscalationEventKind,
    /// Human-readable reason, citing the elapsed-minute threshold where
    /// one applies.
    pub reason: String,
}

/// The kind of an escalation event, tagged per variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EscalationEventKind {
    /// The record was created and tier-1 partners were notified.
    InitialBroadcast {
        /// Starting partner tier (always 1 for engine-created records).
        tier: u8,
        /// Starting urgency supplied by the roster subsystem.
        urgency: Urgency,
    },
    /// The notified partner pool was widened to the next tier.
    TierEscalate {
        /// Tier before the escalation.
        from_tier: u8,
        /// Tier after the escalation. Equals `from_tier` when the record
        /// was already at its tier ceiling.
        to_tier: u8,
    },
    /// The notification urgency was raised.
    UrgencyIncrease {
        /// Urgency before the increase.
        from: Urgency,
        /// Urgency after the increase.
        to: Urgency,
    },
    /// The response deadline was pushed out.
    DeadlineExtend {
        /// Deadline before the extension.
        from: Timestamp,
        /// Deadline after the extension.
        to: Timestamp,
        /// Extension amount in whole minutes.
        extended_by_minutes: i64,
    },
    /// A human supervisor was alerted; no record state changed.
    ManualEscalate,
    /// The shift was covered and the broadcast closed.
    Filled,
    /// The broadcast passed its final cutoff without coverage.
    Expired,
}

impl EscalationEventKind {
    /// The canonical event-kind name used on the wire (e.g. `tier_escalate`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitialBroadcast { .. } => "initial_broadcast",
            Self::TierEscalate { .. } => "tier_escalate",
            Self::UrgencyIncrease { .. } => "urgency_increase",
            Self::DeadlineExtend { .. } => "deadline_extend",
            Self::ManualEscalate => "manual_escalate",
            Self::Filled => "filled",
            Self::Expired => "expired",
        }
    }
}

/// Ordered, append-only sequence of escalation events.
///
/// There is no public mutation API beyond in-crate append: once an event is
/// recorded it cannot be edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EscalationHistory(Vec<EscalationEvent>);

impl EscalationHistory {
    /// An empty history.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The recorded events, oldest first.
    pub fn events(&self) -> &[EscalationEvent] {
        &self.0
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most recent event, if any.
    pub fn last(&self) -> Option<&EscalationEvent> {
        self.0.last()
    }

    /// Whether any recorded event was produced by the given rule.
    pub fn contains_rule(&self, rule_id: &RuleId) -> bool {
        self.0.iter().any(|e| e.rule_id.as_ref() == Some(rule_id))
    }

    pub(crate) fn push(&mut self, event: EscalationEvent) {
        self.0.push(event);
    }
}
