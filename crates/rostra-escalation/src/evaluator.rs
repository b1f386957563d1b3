//! # Rule Evaluator
//!
//! Selects the single next applicable rule for a broadcast record, or
//! nothing. Pure function: no side effects, no I/O, safe to call
//! redundantly from overlapping evaluation passes.

use rostra_core::Timestamp;

use crate::record::{BroadcastRecord, BroadcastStatus};
use crate::rule::EscalationRule;

/// Select the first triggered, not-yet-applied rule for `record`.
///
/// Preconditions and behavior:
///
/// - Any status other than `Pending` yields `None` immediately. Terminal
///   records (filled, expired, cancelled) are never evaluated.
/// - Elapsed time is whole minutes since `broadcasted_at`, truncated
///   toward the past.
/// - `rules` are scanned **in the order supplied**; [`crate::RuleSet`]
///   guarantees ascending trigger order, and this function does not sort.
/// - A rule counts as already applied when its id is tagged on any history
///   event, so every action kind is at-most-once per record.
///
/// Returns `None` when no rule qualifies — including the common steady
/// state where every triggered rule has already been applied.
pub fn select_next_rule<'r>(
    record: &BroadcastRecord,
    rules: &'r [EscalationRule],
    now: Timestamp,
) -> Option<&'r EscalationRule> {
    if record.status != BroadcastStatus::Pending {
        return None;
    }
    let elapsed = record.elapsed_minutes(now);
    rules
        .iter()
        .find(|rule| elapsed >= rule.trigger_after_minutes() && !record.has_applied(rule.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rostra_core::{LocationRef, RuleId, ShiftRef};

    use crate::applier::apply;
    use crate::record::{BroadcastRequest, Urgency};
    use crate::rule::RuleSet;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn t0() -> Timestamp {
        ts("2026-08-06T08:00:00Z")
    }

    fn record() -> BroadcastRecord {
        BroadcastRecord::open(BroadcastRequest {
            shift: ShiftRef::new("shift-41"),
            location: LocationRef::new("ward-b"),
            broadcasted_at: t0(),
            response_deadline: t0().plus_minutes(240),
            auto_escalate_at: None,
            urgency: Urgency::Standard,
            max_tiers: 3,
        })
        .unwrap()
    }

    fn rules() -> RuleSet {
        RuleSet::default_policy()
    }

    #[test]
    fn test_nothing_selected_before_first_threshold() {
        let set = rules();
        let selected = select_next_rule(&record(), set.rules(), t0().plus_minutes(29));
        assert!(selected.is_none());
    }

    #[test]
    fn test_first_rule_selected_at_threshold() {
        let set = rules();
        let selected = select_next_rule(&record(), set.rules(), t0().plus_minutes(30)).unwrap();
        assert_eq!(selected.id().as_str(), "tier-2-at-30m");
    }

    #[test]
    fn test_partial_minute_does_not_trigger() {
        let set = rules();
        // 29m59s elapsed is 29 whole minutes.
        let now = ts("2026-08-06T08:29:59Z");
        assert!(select_next_rule(&record(), set.rules(), now).is_none());
    }

    #[test]
    fn test_skips_applied_rule_and_picks_next_in_order() {
        let set = rules();
        let record = record();
        // Apply the 30-minute rule at T0+45.
        let (record, _) = apply(&record, &set.rules()[0], t0().plus_minutes(45));
        // At T0+65 the 60-minute urgency rule is next, not the 120-minute
        // tier rule and not the already-applied 30-minute rule.
        let selected = select_next_rule(&record, set.rules(), t0().plus_minutes(65)).unwrap();
        assert_eq!(selected.id().as_str(), "urgent-at-60m");
    }

    #[test]
    fn test_terminal_statuses_never_evaluate() {
        let set = rules();
        let filled = record().fill(t0().plus_minutes(10));
        let expired = record().expire(t0().plus_minutes(10));
        let cancelled = record().cancel();
        let late = t0().plus_minutes(500);
        assert!(select_next_rule(&filled, set.rules(), late).is_none());
        assert!(select_next_rule(&expired, set.rules(), late).is_none());
        assert!(select_next_rule(&cancelled, set.rules(), late).is_none());
    }

    #[test]
    fn test_escalated_status_is_not_evaluated() {
        let set = rules();
        let mut record = record();
        record.status = BroadcastStatus::Escalated;
        assert!(select_next_rule(&record, set.rules(), t0().plus_minutes(500)).is_none());
    }

    #[test]
    fn test_cancellation_halts_escalation_forever() {
        let set = rules();
        // Cancelled at T0+40, before the 60-minute rule would trigger.
        let (record, _) = apply(&record(), &set.rules()[0], t0().plus_minutes(35));
        let cancelled = record.cancel();
        for minutes in [41, 65, 130, 500] {
            assert!(
                select_next_rule(&cancelled, set.rules(), t0().plus_minutes(minutes)).is_none()
            );
        }
    }

    #[test]
    fn test_redundant_selection_is_stable() {
        // Two overlapping passes at the same instant pick the same rule.
        let set = rules();
        let record = record();
        let now = t0().plus_minutes(45);
        let a = select_next_rule(&record, set.rules(), now).unwrap();
        let b = select_next_rule(&record, set.rules(), now).unwrap();
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_all_rules_applied_yields_none() {
        let set = rules();
        let mut record = record();
        let mut now = t0();
        for rule in set.rules() {
            now = t0().plus_minutes(rule.trigger_after_minutes() + 5);
            let (next, _) = apply(&record, rule, now);
            record = next;
        }
        assert!(select_next_rule(&record, set.rules(), now.plus_minutes(600)).is_none());
    }

    #[test]
    fn test_untagged_history_does_not_mask_rules() {
        // Fill/expiry events carry no rule id and must not count as
        // applications of any rule.
        let set = rules();
        let record = record();
        assert!(!record.has_applied(&RuleId::new("tier-2-at-30m").unwrap()));
        let selected = select_next_rule(&record, set.rules(), t0().plus_minutes(30));
        assert!(selected.is_some());
    }

    #[test]
    fn test_scan_respects_supplied_order() {
        // A deliberately mis-ordered slice is scanned as supplied; the
        // evaluator does not sort.
        let set = rules();
        let mut shuffled: Vec<_> = set.rules().to_vec();
        shuffled.reverse();
        let selected = select_next_rule(&record(), &shuffled, t0().plus_minutes(70));
        // Reversed order puts the 60-minute rule before the 30-minute one.
        assert_eq!(selected.unwrap().id().as_str(), "urgent-at-60m");
    }
}
