//! # Health Probes
//!
//! Unauthenticated liveness/readiness endpoints for orchestration.

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
}

async fn liveness() -> &'static str {
    "ok"
}

async fn readiness() -> &'static str {
    "ready"
}
