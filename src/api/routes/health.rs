//! Health snapshot endpoint

use axum::{Json, extract::State};

use crate::api::{state::ApiState, types::HealthEntry};

/// GET /health
///
/// Availability and average latency for every monitored target, joined with
/// its domain's stats, in registration order
pub async fn health_snapshot(State(state): State<ApiState>) -> Json<Vec<HealthEntry>> {
    let entries = state.registry.read().await.snapshot_all().await;

    Json(entries.into_iter().map(HealthEntry::from).collect())
}
