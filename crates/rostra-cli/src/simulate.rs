//! # Escalation Timeline Simulator
//!
//! Opens one demo broadcast, then advances a manual clock in fixed steps,
//! running a real scheduler tick at each step and printing every event the
//! engine emits. Useful for eyeballing a tenant's rule set before rollout.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use rostra_core::{LocationRef, ShiftRef};
use rostra_escalation::{
    time_remaining, BroadcastRecord, BroadcastRequest, Clock, ManualClock, Urgency,
};
use rostra_scheduler::{ChannelSink, Escalator, SchedulerConfig};
use rostra_store::{BroadcastStore, MemoryStore};

use crate::rules::load_rule_set;

/// Arguments for the `simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Rule-set file (YAML or JSON); the default policy when omitted.
    #[arg(long)]
    pub rules: Option<PathBuf>,
    /// Minutes of simulated time to cover.
    #[arg(long, default_value_t = 300)]
    pub minutes: i64,
    /// Clock step per tick, in minutes.
    #[arg(long, default_value_t = 5)]
    pub step: i64,
    /// Partner-pool ceiling for the demo broadcast.
    #[arg(long, default_value_t = 3)]
    pub max_tiers: u8,
    /// Response deadline of the demo broadcast, minutes after start.
    #[arg(long, default_value_t = 240)]
    pub deadline_minutes: i64,
    /// Let the scheduler expire the broadcast once the deadline passes.
    #[arg(long, default_value_t = false)]
    pub expire: bool,
}

/// Run the simulator.
pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let rules = load_rule_set(args.rules.as_deref())?;
    let t0 = rostra_core::Timestamp::now();

    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(t0));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let escalator = Escalator::new(
        Arc::clone(&store),
        rules,
        ChannelSink::new(tx),
        Arc::clone(&clock),
        SchedulerConfig {
            expire_past_deadline: args.expire,
            ..Default::default()
        },
    );

    let record = BroadcastRecord::open(BroadcastRequest {
        shift: ShiftRef::new("demo-shift"),
        location: LocationRef::new("demo-ward"),
        broadcasted_at: t0,
        response_deadline: t0.plus_minutes(args.deadline_minutes),
        auto_escalate_at: None,
        urgency: Urgency::Standard,
        max_tiers: args.max_tiers,
    })?;
    let id = record.id.clone();

    println!(
        "broadcast opened: deadline in {}m, {} tiers, {} rules",
        args.deadline_minutes,
        args.max_tiers,
        escalator.rules().len(),
    );
    store.insert(record)?;

    let mut elapsed = 0;
    while elapsed <= args.minutes {
        clock.set(t0.plus_minutes(elapsed));
        escalator.tick();
        while let Ok((record, event)) = rx.try_recv() {
            let remaining = time_remaining(record.response_deadline, clock.now());
            println!(
                "[t+{elapsed:>4}m] {:<16} tier {}/{}  urgency {:<8} {}  ({})",
                event.kind.name(),
                record.current_tier,
                record.max_tiers,
                record.urgency.to_string(),
                event.reason,
                remaining.display,
            );
        }
        elapsed += args.step.max(1);
    }

    if let Some(record) = store.get(&id)? {
        println!(
            "final state: status {}, tier {}/{}, urgency {}, {} history events",
            record.status,
            record.current_tier,
            record.max_tiers,
            record.urgency,
            record.history().len(),
        );
    }
    Ok(())
}
