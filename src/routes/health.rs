//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::ApiState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    /// Number of indexed tickets, absent when the store cannot be read
    pub tickets: Option<usize>,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    let tickets = match state.tickets.count().await {
        Ok(count) => Some(count),
        Err(err) => {
            tracing::warn!(error = %err, "health check could not read ticket index");
            None
        }
    };

    Json(HealthResponse {
        status: if tickets.is_some() { "healthy" } else { "degraded" }.into(),
        version: state.version.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        tickets,
    })
}
