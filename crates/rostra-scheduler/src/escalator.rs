//! # Escalator — The Tick Loop
//!
//! One tick: fetch pending records, evaluate each against the rule set,
//! apply at most one rule per record, commit via compare-and-swap, and
//! dispatch the committed event. Conflict losers re-fetch and re-evaluate
//! within the same tick rather than retrying their stale write.

use std::sync::Arc;

use metrics::{counter, gauge};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use rostra_core::Timestamp;
use rostra_escalation::{
    apply, select_next_rule, time_remaining, BroadcastRecord, Clock, RuleSet,
};
use rostra_store::{BroadcastStore, StoreError};

use crate::sink::EventSink;

/// Scheduler loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between evaluation ticks.
    pub tick_interval_secs: u64,
    /// When set, records past their response deadline are marked expired
    /// during the tick. Off by default: expiry is an out-of-band
    /// transition unless a deployment opts in.
    pub expire_past_deadline: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 60,
            expire_past_deadline: false,
        }
    }
}

/// Outcome counts for one tick, for logs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Pending records fetched.
    pub evaluated: usize,
    /// Rules applied and committed.
    pub applied: usize,
    /// Records expired by the deadline sweep.
    pub expired: usize,
    /// CAS conflicts observed (each followed by a re-evaluation).
    pub conflicts: usize,
    /// Store errors skipped past (the record is retried next tick).
    pub errors: usize,
}

/// The escalation batch driver.
///
/// Generic over its three seams: the record store, the event sink, and
/// the clock. Pure engine calls happen between `fetch` and `update`; the
/// driver holds no per-record state of its own.
pub struct Escalator<S, K, C> {
    store: Arc<S>,
    rules: RuleSet,
    sink: K,
    clock: C,
    config: SchedulerConfig,
}

impl<S, K, C> Escalator<S, K, C>
where
    S: BroadcastStore,
    K: EventSink,
    C: Clock,
{
    /// Assemble a driver from its seams.
    pub fn new(store: Arc<S>, rules: RuleSet, sink: K, clock: C, config: SchedulerConfig) -> Self {
        Self {
            store,
            rules,
            sink,
            clock,
            config,
        }
    }

    /// The rule set this driver evaluates.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Run ticks forever at the configured interval.
    pub async fn run(&self) {
        let period = std::time::Duration::from_secs(self.config.tick_interval_secs.max(1));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(interval_secs = period.as_secs(), "escalation scheduler started");
        loop {
            interval.tick().await;
            let summary = self.tick();
            debug!(
                evaluated = summary.evaluated,
                applied = summary.applied,
                expired = summary.expired,
                conflicts = summary.conflicts,
                errors = summary.errors,
                "tick complete",
            );
        }
    }

    /// Run one evaluation pass over every pending record.
    ///
    /// A fetch failure yields an empty summary with one error; individual
    /// record failures are counted and skipped so one bad record cannot
    /// starve the rest of the batch.
    pub fn tick(&self) -> TickSummary {
        let mut summary = TickSummary::default();
        let now = self.clock.now();

        let pending = match self.store.fetch_pending() {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "failed to fetch pending broadcasts");
                summary.errors += 1;
                return summary;
            }
        };
        gauge!("rostra_broadcasts_pending").set(pending.len() as f64);

        for record in pending {
            summary.evaluated += 1;
            if let Err(err) = self.step(record, now, &mut summary) {
                warn!(error = %err, "broadcast step failed; retrying next tick");
                summary.errors += 1;
            }
        }
        summary
    }

    /// Evaluate and, where applicable, escalate or expire one record.
    fn step(
        &self,
        record: BroadcastRecord,
        now: Timestamp,
        summary: &mut TickSummary,
    ) -> Result<(), StoreError> {
        if self.config.expire_past_deadline
            && time_remaining(record.response_deadline, now).is_overdue
        {
            let expired = record.expire(now);
            let committed = self.store.update(expired)?;
            if let Some(event) = committed.history().last() {
                self.sink.dispatch(&committed, event);
            }
            counter!("rostra_broadcasts_expired_total").increment(1);
            summary.expired += 1;
            return Ok(());
        }

        let Some(rule) = select_next_rule(&record, self.rules.rules(), now) else {
            return Ok(());
        };
        let (next, event) = apply(&record, rule, now);

        match self.store.update(next) {
            Ok(committed) => {
                counter!("rostra_rules_applied_total").increment(1);
                summary.applied += 1;
                self.sink.dispatch(&committed, &event);
                Ok(())
            }
            Err(err) if err.is_conflict() => {
                // A concurrent writer won. Re-evaluate against its commit:
                // if the rule landed there, this pass becomes a no-op.
                counter!("rostra_store_conflicts_total").increment(1);
                summary.conflicts += 1;
                debug!(id = %record.id, "version conflict; re-evaluating");
                let Some(fresh) = self.store.get(&record.id)? else {
                    return Ok(());
                };
                let Some(rule) = select_next_rule(&fresh, self.rules.rules(), now) else {
                    return Ok(());
                };
                let (next, event) = apply(&fresh, rule, now);
                match self.store.update(next) {
                    Ok(committed) => {
                        counter!("rostra_rules_applied_total").increment(1);
                        summary.applied += 1;
                        self.sink.dispatch(&committed, &event);
                        Ok(())
                    }
                    // Contended again: leave it for the next tick.
                    Err(err) if err.is_conflict() => {
                        summary.conflicts += 1;
                        Ok(())
                    }
                    Err(err) => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rostra_core::{LocationRef, ShiftRef, Timestamp};
    use rostra_escalation::{BroadcastRequest, BroadcastStatus, ManualClock, Urgency};
    use rostra_store::MemoryStore;

    use crate::sink::ChannelSink;

    fn t0() -> Timestamp {
        Timestamp::parse("2026-08-06T08:00:00Z").unwrap()
    }

    fn request(deadline_minutes: i64) -> BroadcastRequest {
        BroadcastRequest {
            shift: ShiftRef::new("shift-41"),
            location: LocationRef::new("ward-b"),
            broadcasted_at: t0(),
            response_deadline: t0().plus_minutes(deadline_minutes),
            auto_escalate_at: None,
            urgency: Urgency::Standard,
            max_tiers: 3,
        }
    }

    fn harness(
        config: SchedulerConfig,
    ) -> (
        Escalator<MemoryStore, ChannelSink, Arc<ManualClock>>,
        Arc<MemoryStore>,
        Arc<ManualClock>,
        tokio::sync::mpsc::UnboundedReceiver<(BroadcastRecord, rostra_escalation::EscalationEvent)>,
    ) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(t0()));
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let escalator = Escalator::new(
            Arc::clone(&store),
            RuleSet::default_policy(),
            ChannelSink::new(tx),
            Arc::clone(&clock),
            config,
        );
        (escalator, store, clock, rx)
    }

    #[tokio::test]
    async fn test_tick_applies_one_rule_per_record() {
        let (escalator, store, clock, mut rx) = harness(SchedulerConfig::default());
        let record = BroadcastRecord::open(request(240)).unwrap();
        let id = record.id.clone();
        store.insert(record).unwrap();

        clock.set(t0().plus_minutes(65));
        let summary = escalator.tick();
        assert_eq!(summary, TickSummary { evaluated: 1, applied: 1, ..Default::default() });

        // Only the 30-minute rule applied, even though the 60-minute one
        // is also triggered: one rule per record per tick.
        let stored = store.get(&id).unwrap().unwrap();
        assert_eq!(stored.current_tier, 2);
        assert_eq!(stored.urgency, Urgency::Standard);
        assert_eq!(stored.version, 1);

        let (_, event) = rx.recv().await.unwrap();
        assert_eq!(event.kind.name(), "tier_escalate");
    }

    #[tokio::test]
    async fn test_successive_ticks_drain_triggered_rules() {
        let (escalator, store, clock, _rx) = harness(SchedulerConfig::default());
        let record = BroadcastRecord::open(request(240)).unwrap();
        let id = record.id.clone();
        store.insert(record).unwrap();

        clock.set(t0().plus_minutes(65));
        escalator.tick();
        escalator.tick();
        let third = escalator.tick();

        let stored = store.get(&id).unwrap().unwrap();
        assert_eq!(stored.current_tier, 2);
        assert_eq!(stored.urgency, Urgency::Urgent);
        // Third tick found nothing left to do at 65 minutes.
        assert_eq!(third.applied, 0);
        assert_eq!(stored.history().len(), 3);
    }

    #[tokio::test]
    async fn test_terminal_records_are_skipped_entirely() {
        let (escalator, store, clock, _rx) = harness(SchedulerConfig::default());
        let record = BroadcastRecord::open(request(240)).unwrap().cancel();
        store.insert(record).unwrap();

        clock.set(t0().plus_minutes(500));
        let summary = escalator.tick();
        assert_eq!(summary.evaluated, 0);
        assert_eq!(summary.applied, 0);
    }

    #[tokio::test]
    async fn test_expiry_sweep_off_by_default() {
        let (escalator, store, clock, _rx) = harness(SchedulerConfig::default());
        let record = BroadcastRecord::open(request(30)).unwrap();
        let id = record.id.clone();
        store.insert(record).unwrap();

        // Past deadline, before any untried threshold beyond 30m.
        clock.set(t0().plus_minutes(45));
        escalator.tick();
        let stored = store.get(&id).unwrap().unwrap();
        assert_eq!(stored.status, BroadcastStatus::Pending);
    }

    #[tokio::test]
    async fn test_expiry_sweep_marks_overdue_records() {
        let config = SchedulerConfig { expire_past_deadline: true, ..Default::default() };
        let (escalator, store, clock, mut rx) = harness(config);
        let record = BroadcastRecord::open(request(30)).unwrap();
        let id = record.id.clone();
        store.insert(record).unwrap();

        clock.set(t0().plus_minutes(45));
        let summary = escalator.tick();
        assert_eq!(summary.expired, 1);
        assert_eq!(summary.applied, 0);

        let stored = store.get(&id).unwrap().unwrap();
        assert_eq!(stored.status, BroadcastStatus::Expired);
        assert_eq!(stored.history().last().unwrap().kind.name(), "expired");

        let (_, event) = rx.recv().await.unwrap();
        assert_eq!(event.kind.name(), "expired");

        // Expired is terminal: the next tick does no work on it.
        let next = escalator.tick();
        assert_eq!(next.evaluated, 0);
    }

    #[tokio::test]
    async fn test_tick_covers_multiple_records() {
        let (escalator, store, clock, _rx) = harness(SchedulerConfig::default());
        for _ in 0..3 {
            store.insert(BroadcastRecord::open(request(240)).unwrap()).unwrap();
        }
        clock.set(t0().plus_minutes(31));
        let summary = escalator.tick();
        assert_eq!(summary.evaluated, 3);
        assert_eq!(summary.applied, 3);
    }
}
