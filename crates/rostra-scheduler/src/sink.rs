//! # Event Dispatch Seam
//!
//! Every escalation event the driver commits is offered to an `EventSink`.
//! The notification dispatcher hangs off this seam: `tier_escalate` means
//! "notify the newly added tier's partners", `urgency_increase` means
//! "re-notify with elevated framing", `manual_escalate` means "alert a
//! supervisor". How those notifications are physically delivered is
//! outside this workspace.

use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use rostra_escalation::{BroadcastRecord, EscalationEvent};

/// Receiver of committed escalation events.
///
/// Dispatch must not block: a real dispatcher enqueues and returns. Sinks
/// are invoked after the store commit, so an event handed to a sink is
/// already durable in the record's history.
pub trait EventSink: Send + Sync {
    /// Offer one committed event together with the record it belongs to.
    fn dispatch(&self, record: &BroadcastRecord, event: &EscalationEvent);
}

/// Sink that logs each event through `tracing`.
///
/// The default in the CLI: operationally useful and dependency-free.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn dispatch(&self, record: &BroadcastRecord, event: &EscalationEvent) {
        info!(
            broadcast = %record.id,
            shift = %record.shift,
            kind = event.kind.name(),
            tier = record.current_tier,
            urgency = %record.urgency,
            reason = %event.reason,
            "escalation event",
        );
    }
}

/// Sink that forwards events over a tokio channel.
///
/// Used by the test suites and by embedders that bridge events into their
/// own dispatch pipeline.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<(BroadcastRecord, EscalationEvent)>,
}

impl ChannelSink {
    /// Wrap an unbounded sender.
    pub fn new(tx: UnboundedSender<(BroadcastRecord, EscalationEvent)>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn dispatch(&self, record: &BroadcastRecord, event: &EscalationEvent) {
        // A closed receiver just means nobody is listening anymore.
        let _ = self.tx.send((record.clone(), event.clone()));
    }
}
