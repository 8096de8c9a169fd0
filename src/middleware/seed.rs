//! Seed-on-first-request middleware

use crate::error::ApiError;
use crate::store::seed;
use crate::ApiState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::sync::Arc;

/// Make sure experts and tickets exist before any `/api` handler runs.
///
/// Each entity type seeds only when its index is empty, so this is a cheap
/// index read on every request after the first.
pub async fn ensure_seed(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.config.seed_on_request {
        state.experts.ensure_seed_with(seed::experts).await?;
        state.tickets.ensure_seed_with(|| seed::tickets(Utc::now())).await?;
    }
    Ok(next.run(request).await)
}
