//! Expert endpoints

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::{models::*, ApiState};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_experts))
        .route("/:id", get(get_expert))
}

/// List all experts
#[utoipa::path(
    get,
    path = "/api/experts",
    responses((status = 200, description = "All experts in index order", body = [Expert])),
    tag = "experts"
)]
pub async fn list_experts(
    State(state): State<Arc<ApiState>>,
) -> ApiResult<Json<ApiResponse<Vec<Expert>>>> {
    let experts = state.experts.list().await?;
    Ok(Json(ApiResponse::success(experts)))
}

/// Get expert by ID
#[utoipa::path(
    get,
    path = "/api/experts/{id}",
    params(("id" = String, Path, description = "Expert ID")),
    responses(
        (status = 200, description = "Expert details", body = Expert),
        (status = 404, description = "Expert not found", body = ErrorResponse)
    ),
    tag = "experts"
)]
pub async fn get_expert(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Expert>>> {
    let expert = state
        .experts
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Expert {id} not found")))?;
    Ok(Json(ApiResponse::success(expert)))
}
