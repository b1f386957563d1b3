//! # Prometheus Exposition
//!
//! Renders the process's metrics when the binary installed a Prometheus
//! recorder (see `rostra serve`). Returns 503 otherwise so scrapers can
//! tell "not wired" apart from "no samples yet".

use axum::extract::State;
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Build the metrics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/metrics", get(render))
}

async fn render(State(state): State<AppState>) -> Result<String, AppError> {
    let handle = state
        .metrics
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("metrics recorder not installed".into()))?;
    Ok(handle.render())
}
