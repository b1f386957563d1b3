//! # Combined Scheduler + API Server
//!
//! Runs the escalation scheduler and the read-only reporting API in one
//! process over a shared in-memory store. Real deployments embed the
//! scheduler and API crates over their own `BroadcastStore`; this
//! subcommand is the reference wiring and a demo environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

use rostra_api::AppState;
use rostra_core::{LocationRef, ShiftRef, Timestamp};
use rostra_escalation::{BroadcastRecord, BroadcastRequest, SystemClock, Urgency};
use rostra_scheduler::{Escalator, LogSink, SchedulerConfig};
use rostra_store::{BroadcastStore, MemoryStore};

use crate::rules::load_rule_set;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Listen address for the reporting API.
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: SocketAddr,
    /// Rule-set file (YAML or JSON); the default policy when omitted.
    #[arg(long)]
    pub rules: Option<PathBuf>,
    /// Seconds between scheduler ticks.
    #[arg(long, default_value_t = 60)]
    pub tick_secs: u64,
    /// Let the scheduler expire broadcasts past their deadline.
    #[arg(long, default_value_t = false)]
    pub expire: bool,
    /// Seed this many demo broadcasts into the store at startup.
    #[arg(long, default_value_t = 0)]
    pub seed: u32,
}

/// Run the combined server.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(serve(args))
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let rules = load_rule_set(args.rules.as_deref())?;
    let store = Arc::new(MemoryStore::new());
    seed_demo_broadcasts(&store, args.seed)?;

    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("installing metrics recorder")?;

    let escalator = Arc::new(Escalator::new(
        Arc::clone(&store),
        rules,
        LogSink,
        SystemClock,
        SchedulerConfig {
            tick_interval_secs: args.tick_secs,
            expire_past_deadline: args.expire,
        },
    ));
    let scheduler = Arc::clone(&escalator);
    tokio::spawn(async move { scheduler.run().await });

    let state = AppState::new(store, Arc::new(SystemClock)).with_metrics(metrics_handle);
    let app = rostra_api::app(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("binding {}", args.addr))?;
    info!(addr = %args.addr, "reporting API listening");
    axum::serve(listener, app).await.context("serving API")?;
    Ok(())
}

fn seed_demo_broadcasts(store: &MemoryStore, count: u32) -> anyhow::Result<()> {
    let now = Timestamp::now();
    for n in 0..count {
        let record = BroadcastRecord::open(BroadcastRequest {
            shift: ShiftRef::new(format!("demo-shift-{n}")),
            location: LocationRef::new("demo-ward"),
            broadcasted_at: now,
            response_deadline: now.plus_minutes(240),
            auto_escalate_at: None,
            urgency: Urgency::Standard,
            max_tiers: 3,
        })?;
        store.insert(record)?;
    }
    if count > 0 {
        info!(count, "seeded demo broadcasts");
    }
    Ok(())
}
