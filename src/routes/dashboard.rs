//! Dashboard endpoints

use axum::extract::{rejection::QueryRejection, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Local, Utc};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::ApiResult;
use crate::query::{engine, metrics, TimeRange};
use crate::{models::*, ApiState};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/metrics", get(get_metrics))
        .route("/trends", get(get_trends))
        .route("/performance", get(get_performance))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangeParams {
    /// 24h, 7d or 30d
    range: Option<String>,
}

/// Get dashboard KPIs
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    params(RangeParams),
    responses(
        (status = 200, description = "KPIs with period-over-period change", body = DashboardMetrics),
        (status = 400, description = "Unknown range", body = ErrorResponse)
    ),
    tag = "dashboard"
)]
pub async fn get_metrics(
    State(state): State<Arc<ApiState>>,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<DashboardMetrics>>> {
    let Query(params) = params?;
    let range = TimeRange::parse_or(params.range.as_deref(), TimeRange::Last24Hours)?;
    let tickets = state.tickets.list().await?;
    let expert_count = state.experts.count().await?;

    let metrics = metrics::dashboard_metrics(&tickets, range, Utc::now(), expert_count);
    tracing::debug!(?range, helped = metrics.vibers_helped.value, "computed dashboard metrics");
    Ok(Json(ApiResponse::success(metrics)))
}

/// Get top platforms and issue types
#[utoipa::path(
    get,
    path = "/api/dashboard/trends",
    params(RangeParams),
    responses(
        (status = 200, description = "Top five platforms and issue types", body = TrendsResponse),
        (status = 400, description = "Unknown range", body = ErrorResponse)
    ),
    tag = "dashboard"
)]
pub async fn get_trends(
    State(state): State<Arc<ApiState>>,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<TrendsResponse>>> {
    let Query(params) = params?;
    let range = TimeRange::parse_or(params.range.as_deref(), TimeRange::Last24Hours)?;
    let tickets = state.tickets.list().await?;

    let trends = engine::trends(&tickets, &range.window(Utc::now()));
    Ok(Json(ApiResponse::success(trends)))
}

/// Get created vs resolved tickets per day
#[utoipa::path(
    get,
    path = "/api/dashboard/performance",
    params(RangeParams),
    responses(
        (status = 200, description = "One point per local calendar day, oldest first", body = [OverTimeDataPoint]),
        (status = 400, description = "Unknown range", body = ErrorResponse)
    ),
    tag = "dashboard"
)]
pub async fn get_performance(
    State(state): State<Arc<ApiState>>,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Vec<OverTimeDataPoint>>>> {
    let Query(params) = params?;
    let range = TimeRange::parse_or(params.range.as_deref(), TimeRange::Last7Days)?;
    let tickets = state.tickets.list().await?;

    let series = engine::daily_series(&tickets, range.series_days(), Utc::now(), &Local);
    Ok(Json(ApiResponse::success(series)))
}
