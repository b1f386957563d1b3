//! # Broadcast Reporting API
//!
//! Read-only endpoints over the broadcast record store.
//!
//! ## Endpoints
//!
//! - `GET /v1/broadcasts`        — list records, optional `?status=` filter
//! - `GET /v1/broadcasts/{id}`   — one record with full escalation history
//!
//! Remaining time is computed at request time from the record's response
//! deadline, so the display text is always current. There is deliberately
//! no mutation path here: escalation belongs to the scheduler, fill and
//! cancel belong to the roster subsystem.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rostra_core::BroadcastId;
use rostra_escalation::{
    time_remaining, BroadcastRecord, BroadcastStatus, EscalationEvent, TimeRemaining,
};

use crate::error::AppError;
use crate::state::AppState;

// ─── Request / Response types ───────────────────────────────────────

/// Response representing one broadcast record.
#[derive(Debug, Serialize, Deserialize)]
pub struct BroadcastResponse {
    /// Unique broadcast identifier.
    pub id: Uuid,
    /// Opaque shift reference.
    pub shift: String,
    /// Opaque location/department reference.
    pub location: String,
    /// Lifecycle status (`pending`, `filled`, ...).
    pub status: BroadcastStatus,
    /// Current urgency framing.
    pub urgency: String,
    /// Current partner tier.
    pub current_tier: u8,
    /// Partner-pool ceiling.
    pub max_tiers: u8,
    /// Broadcast start (ISO8601, UTC).
    pub broadcasted_at: String,
    /// Response cutoff (ISO8601, UTC), including extensions.
    pub response_deadline: String,
    /// Partners notified so far.
    pub partners_notified: u32,
    /// Partners that responded.
    pub partners_responded: u32,
    /// Remaining/overdue time as of this request.
    pub time_remaining: TimeRemaining,
    /// Full escalation history, oldest first.
    pub history: Vec<EscalationEvent>,
    /// Store version.
    pub version: u64,
}

impl BroadcastResponse {
    fn from_record(record: &BroadcastRecord, state: &AppState) -> Self {
        let now = state.clock.now();
        Self {
            id: *record.id.as_uuid(),
            shift: record.shift.as_str().to_string(),
            location: record.location.as_str().to_string(),
            status: record.status,
            urgency: record.urgency.to_string(),
            current_tier: record.current_tier,
            max_tiers: record.max_tiers,
            broadcasted_at: record.broadcasted_at.to_iso8601(),
            response_deadline: record.response_deadline.to_iso8601(),
            partners_notified: record.partners_notified,
            partners_responded: record.partners_responded,
            time_remaining: time_remaining(record.response_deadline, now),
            history: record.history().events().to_vec(),
            version: record.version,
        }
    }
}

/// Broadcast list response.
#[derive(Debug, Serialize, Deserialize)]
pub struct BroadcastListResponse {
    /// Matching records.
    pub broadcasts: Vec<BroadcastResponse>,
    /// Number of matching records.
    pub total: usize,
}

/// List filter parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Restrict to one lifecycle status (wire name, e.g. `pending`).
    #[serde(default)]
    pub status: Option<String>,
}

// ─── Router ─────────────────────────────────────────────────────────

/// Build the broadcasts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/broadcasts", get(list_broadcasts))
        .route("/v1/broadcasts/{id}", get(get_broadcast))
}

async fn list_broadcasts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<BroadcastListResponse>, AppError> {
    let filter = params
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?;

    let mut records = state.store.fetch_all()?;
    if let Some(status) = filter {
        records.retain(|r| r.status == status);
        tracing::debug!(status = status.as_str(), matched = records.len(), "broadcast list filtered");
    }
    // Newest broadcasts first for reporting views.
    records.sort_by(|a, b| b.broadcasted_at.cmp(&a.broadcasted_at));

    let broadcasts: Vec<_> = records
        .iter()
        .map(|r| BroadcastResponse::from_record(r, &state))
        .collect();
    let total = broadcasts.len();
    Ok(Json(BroadcastListResponse { broadcasts, total }))
}

async fn get_broadcast(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BroadcastResponse>, AppError> {
    let id = BroadcastId(id);
    let record = state
        .store
        .get(&id)?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    Ok(Json(BroadcastResponse::from_record(&record, &state)))
}

fn parse_status(raw: &str) -> Result<BroadcastStatus, AppError> {
    match raw {
        "pending" => Ok(BroadcastStatus::Pending),
        "escalated" => Ok(BroadcastStatus::Escalated),
        "filled" => Ok(BroadcastStatus::Filled),
        "expired" => Ok(BroadcastStatus::Expired),
        "cancelled" => Ok(BroadcastStatus::Cancelled),
        other => Err(AppError::Validation(format!("unknown status filter {other:?}"))),
    }
}
