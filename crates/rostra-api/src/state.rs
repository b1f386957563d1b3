//! # Application State
//!
//! Shared state for the Axum application: the record store, the clock used
//! for remaining-time display, and the optional Prometheus handle.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use rostra_escalation::Clock;
use rostra_store::BroadcastStore;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record store, shared with the scheduler.
    pub store: Arc<dyn BroadcastStore>,
    /// Time source for remaining-time display.
    pub clock: Arc<dyn Clock>,
    /// Prometheus exposition handle, when the binary installed a recorder.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state over a store and clock, without metrics exposition.
    pub fn new(store: Arc<dyn BroadcastStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` route.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
