//! # rostra-api — Read-Only Reporting Surface
//!
//! Axum service exposing broadcast records to UI and reporting consumers:
//! status, tier, urgency, full escalation history, and remaining time
//! against the response deadline. Strictly read-only — records are mutated
//! only by the scheduler and the roster subsystem, never from this
//! surface.
//!
//! ## Routes
//!
//! - `GET /v1/broadcasts` — list records, optional `?status=` filter
//! - `GET /v1/broadcasts/{id}` — one record with full history
//! - `GET /health/liveness` / `GET /health/readiness` — probes
//! - `GET /metrics` — Prometheus exposition (when a recorder is installed)
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers — delegates to `rostra-escalation`
//!   for remaining-time display and to the store for data.
//! - All errors map to structured HTTP responses via `AppError`.

pub mod error;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::broadcasts::router())
        .merge(routes::metrics::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
