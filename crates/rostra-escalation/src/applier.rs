//! # Escalation Applier
//!
//! Applies a selected rule to a broadcast record, producing a new record
//! version plus the single history event describing what changed. The
//! applier performs no time comparison itself — it trusts the evaluator to
//! have established applicability.

use rostra_core::Timestamp;

use crate::event::{EscalationEvent, EscalationEventKind};
use crate::record::BroadcastRecord;
use crate::rule::{EscalationRule, RuleAction};

/// Apply `rule` to `record`, returning the updated record and the appended
/// event.
///
/// Value-based update: the input record is never mutated; the returned
/// record is a fresh version with exactly one more history event, tagged
/// with the rule's id. This is what the store's optimistic concurrency
/// control commits.
///
/// Per-action behavior:
///
/// - `EscalateTier` widens to the next tier. At the tier ceiling the tier
///   is left unchanged but the event is still appended with
///   `from_tier == to_tier` — the tag keeps the rule from being selected
///   again on every subsequent pass.
/// - `IncreaseUrgency` replaces the urgency. Nothing prevents a
///   misconfigured rule set from moving urgency backward; forward-only
///   ordering is a configuration contract.
/// - `ExtendDeadline` pushes `response_deadline` out by the configured
///   minutes.
/// - `NotifySupervisor` appends a `manual_escalate` event and changes no
///   other state; delivering the alert is the dispatcher's reaction to the
///   event, not performed here.
pub fn apply(
    record: &BroadcastRecord,
    rule: &EscalationRule,
    now: Timestamp,
) -> (BroadcastRecord, EscalationEvent) {
    let mut next = record.clone();
    let threshold = rule.trigger_after_minutes();

    let (kind, reason) = match rule.action() {
        RuleAction::EscalateTier => {
            let from_tier = next.current_tier;
            let to_tier = if from_tier < next.max_tiers {
                from_tier + 1
            } else {
                from_tier
            };
            next.current_tier = to_tier;
            let reason = if to_tier > from_tier {
                format!("no coverage {threshold} minutes after broadcast; widening to tier {to_tier}")
            } else {
                format!("no coverage {threshold} minutes after broadcast; already at tier ceiling {from_tier}")
            };
            (EscalationEventKind::TierEscalate { from_tier, to_tier }, reason)
        }
        RuleAction::IncreaseUrgency { new_urgency } => {
            let from = next.urgency;
            next.urgency = *new_urgency;
            (
                EscalationEventKind::UrgencyIncrease { from, to: *new_urgency },
                format!("no coverage {threshold} minutes after broadcast; raising urgency to {new_urgency}"),
            )
        }
        RuleAction::ExtendDeadline { extend_minutes } => {
            let from = next.response_deadline;
            let to = from.plus_minutes(*extend_minutes);
            next.response_deadline = to;
            (
                EscalationEventKind::DeadlineExtend {
                    from,
                    to,
                    extended_by_minutes: *extend_minutes,
                },
                format!("no coverage {threshold} minutes after broadcast; extending deadline by {extend_minutes} minutes"),
            )
        }
        RuleAction::NotifySupervisor => (
            EscalationEventKind::ManualEscalate,
            format!("no coverage {threshold} minutes after broadcast; supervisor alerted"),
        ),
    };

    let event = EscalationEvent {
        at: now,
        rule_id: Some(rule.id().clone()),
        kind,
        reason,
    };
    next.push_event(event.clone());
    (next, event)
}
