//! # Broadcast Record — One Shift's External-Coverage Lifecycle
//!
//! A `BroadcastRecord` is created when a shift fails to fill internally and
//! is offered to external staffing partners. From then on it is mutated
//! only by the rule evaluator/applier pair, or closed by an external
//! fill/expire/cancel action. Terminal records are retained unchanged for
//! audit and reporting.
//!
//! ## Statuses
//!
//! ```text
//! Pending ──fill()───▶ Filled     (terminal)
//!    │ ────expire()──▶ Expired    (terminal)
//!    │ ────cancel()──▶ Cancelled  (terminal)
//!    └──rule application keeps the record Pending
//! ```
//!
//! `Escalated` exists for wire compatibility with older roster payloads but
//! is never produced here; `Pending` is the only status in which rule
//! evaluation proceeds.
//!
//! ## Invariants
//!
//! - `current_tier` stays within `[1, max_tiers]`; the applier never
//!   increments past the ceiling.
//! - The escalation history is append-only.
//! - Terminal statuses are absorbing: `fill()`/`expire()`/`cancel()` on an
//!   already-terminal record return it unchanged, and the evaluator skips
//!   terminal records entirely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rostra_core::{BroadcastId, LocationRef, PartnerId, RuleId, ShiftRef, Timestamp, ValidationError};

use crate::event::{EscalationEvent, EscalationEventKind, EscalationHistory};

// ─── Urgency ────────────────────────────────────────────────────────

/// Notification urgency framing, independent of partner tier.
///
/// Ordered `Standard < Urgent < Critical`. Escalation rules are expected to
/// move urgency forward; that ordering is a configuration contract, not an
/// invariant the applier enforces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Routine coverage request.
    Standard,
    /// Elevated framing for re-notification.
    Urgent,
    /// Highest framing; typically paired with supervisor alerts.
    Critical,
}

impl Urgency {
    /// The canonical wire name (e.g. `urgent`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Urgent => "urgent",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Status ─────────────────────────────────────────────────────────

/// Lifecycle status of a broadcast record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadcastStatus {
    /// Open and subject to rule evaluation.
    Pending,
    /// Carried for compatibility with older roster payloads; the engine
    /// never produces it and never evaluates records holding it.
    Escalated,
    /// Shift covered by a partner (terminal).
    Filled,
    /// Final cutoff passed without coverage (terminal).
    Expired,
    /// Withdrawn out-of-band by the roster subsystem (terminal).
    Cancelled,
}

impl BroadcastStatus {
    /// The canonical wire name (e.g. `pending`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Escalated => "escalated",
            Self::Filled => "filled",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether this status admits no further transitions or evaluation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Filled | Self::Expired | Self::Cancelled)
    }
}

impl std::fmt::Display for BroadcastStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Partner responses (opaque payload) ─────────────────────────────

/// Per-candidate status of a partner submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// Candidate submitted, awaiting review.
    Submitted,
    /// Candidate withdrawn by the partner.
    Withdrawn,
    /// Candidate accepted for the shift.
    Accepted,
    /// Candidate declined by the scheduler.
    Rejected,
}

/// Score components attached to a candidate submission.
///
/// Produced and consumed by the candidate-ranking service; the escalation
/// engine carries these values but never evaluates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseScore {
    /// Named score components (e.g. reliability, proximity).
    pub components: BTreeMap<String, f64>,
    /// Combined score.
    pub total: f64,
}

/// One candidate submission from a staffing partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerResponse {
    /// The submitting partner.
    pub partner: PartnerId,
    /// When the submission arrived.
    pub submitted_at: Timestamp,
    /// Per-candidate review status.
    pub status: ResponseStatus,
    /// Opaque ranking payload.
    pub score: ResponseScore,
}

// ─── Broadcast request ──────────────────────────────────────────────

/// Parameters supplied by the roster subsystem when a shift is first
/// broadcast to external partners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastRequest {
    /// Opaque shift reference.
    pub shift: ShiftRef,
    /// Opaque location/department reference.
    pub location: LocationRef,
    /// Broadcast start; elapsed-time thresholds are measured from here.
    pub broadcasted_at: Timestamp,
    /// Final response cutoff.
    pub response_deadline: Timestamp,
    /// Informational hint for the next evaluation pass. The real driver is
    /// elapsed time against rule thresholds, never this field.
    #[serde(default)]
    pub auto_escalate_at: Option<Timestamp>,
    /// Starting urgency framing.
    pub urgency: Urgency,
    /// Partner-pool ceiling; tiers run `1..=max_tiers`.
    pub max_tiers: u8,
}

// ─── Broadcast record ───────────────────────────────────────────────

/// One shift's external-coverage lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastRecord {
    /// Unique broadcast identifier.
    pub id: BroadcastId,
    /// Opaque shift reference (roster subsystem).
    pub shift: ShiftRef,
    /// Opaque location/department reference (staff directory).
    pub location: LocationRef,
    /// Broadcast start.
    pub broadcasted_at: Timestamp,
    /// Final response cutoff, possibly extended by rules.
    pub response_deadline: Timestamp,
    /// Informational next-evaluation hint.
    pub auto_escalate_at: Option<Timestamp>,
    /// Current urgency framing.
    pub urgency: Urgency,
    /// Current partner tier, in `[1, max_tiers]`.
    pub current_tier: u8,
    /// Partner-pool ceiling.
    pub max_tiers: u8,
    /// Lifecycle status.
    pub status: BroadcastStatus,
    /// Count of partners notified so far (maintained by the dispatcher).
    pub partners_notified: u32,
    /// Count of partners that have responded.
    pub partners_responded: u32,
    /// Candidate submissions, carried but not evaluated here.
    pub responses: Vec<PartnerResponse>,
    /// Append-only audit trail.
    history: EscalationHistory,
    /// Store version for optimistic concurrency control.
    pub version: u64,
}

impl BroadcastRecord {
    /// Open a new broadcast at tier 1 with an `initial_broadcast` event.
    ///
    /// # Errors
    ///
    /// Rejects `max_tiers == 0` — a broadcast with no partner tiers to
    /// notify can never be covered.
    pub fn open(request: BroadcastRequest) -> Result<Self, ValidationError> {
        Self::open_at_tier(request, 1)
    }

    /// Open a broadcast at an explicit starting tier.
    ///
    /// Used when re-ingesting records from the roster subsystem. The
    /// starting tier must lie in `[1, max_tiers]`.
    pub fn open_at_tier(request: BroadcastRequest, tier: u8) -> Result<Self, ValidationError> {
        if request.max_tiers == 0 {
            return Err(ValidationError::NoTiers);
        }
        if tier < 1 || tier > request.max_tiers {
            return Err(ValidationError::TierOutOfRange {
                tier,
                max_tiers: request.max_tiers,
            });
        }

        let mut history = EscalationHistory::new();
        history.push(EscalationEvent {
            at: request.broadcasted_at,
            rule_id: None,
            kind: EscalationEventKind::InitialBroadcast {
                tier,
                urgency: request.urgency,
            },
            reason: format!("shift broadcast to tier {tier} partners"),
        });

        Ok(Self {
            id: BroadcastId::new(),
            shift: request.shift,
            location: request.location,
            broadcasted_at: request.broadcasted_at,
            response_deadline: request.response_deadline,
            auto_escalate_at: request.auto_escalate_at,
            urgency: request.urgency,
            current_tier: tier,
            max_tiers: request.max_tiers,
            status: BroadcastStatus::Pending,
            partners_notified: 0,
            partners_responded: 0,
            responses: Vec::new(),
            history,
            version: 0,
        })
    }

    /// The append-only escalation history.
    pub fn history(&self) -> &EscalationHistory {
        &self.history
    }

    /// Whether the given rule has already been applied to this record.
    pub fn has_applied(&self, rule_id: &RuleId) -> bool {
        self.history.contains_rule(rule_id)
    }

    /// Whole minutes elapsed since the broadcast started, truncated toward
    /// the past.
    pub fn elapsed_minutes(&self, now: Timestamp) -> i64 {
        now.minutes_since(self.broadcasted_at)
    }

    /// Whether the record is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Record a candidate submission from a partner.
    pub fn record_response(&mut self, response: PartnerResponse) {
        self.partners_responded += 1;
        self.responses.push(response);
    }

    /// Close the broadcast as covered, appending a `filled` event.
    ///
    /// Terminal statuses are absorbing: filling an already-terminal record
    /// returns it unchanged.
    pub fn fill(self, now: Timestamp) -> Self {
        if self.is_terminal() {
            return self;
        }
        let mut next = self;
        next.status = BroadcastStatus::Filled;
        next.history.push(EscalationEvent {
            at: now,
            rule_id: None,
            kind: EscalationEventKind::Filled,
            reason: "shift covered by partner response".into(),
        });
        next
    }

    /// Close the broadcast as uncovered, appending an `expired` event.
    ///
    /// Terminal statuses are absorbing.
    pub fn expire(self, now: Timestamp) -> Self {
        if self.is_terminal() {
            return self;
        }
        let mut next = self;
        next.status = BroadcastStatus::Expired;
        next.history.push(EscalationEvent {
            at: now,
            rule_id: None,
            kind: EscalationEventKind::Expired,
            reason: "response deadline passed without coverage".into(),
        });
        next
    }

    /// Withdraw the broadcast out-of-band.
    ///
    /// Cancellation originates in the roster subsystem, not in the engine,
    /// and has no event kind of its own; the status flip alone halts all
    /// further rule evaluation. Terminal statuses are absorbing.
    pub fn cancel(self) -> Self {
        if self.is_terminal() {
            return self;
        }
        let mut next = self;
        next.status = BroadcastStatus::Cancelled;
        next
    }

    pub(crate) fn push_event(&mut self, event: EscalationEvent) {
        self.history.push(event);
    }
}
