//! Ticket endpoints

use axum::extract::{rejection::QueryRejection, Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::experts::ExpertDirectory;
use crate::query::{engine, QueryError, SortField, SortOrder, SortSpec, TicketFilter, TicketQuery};
use crate::{models::*, ApiState};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_tickets))
        .route("/:id", get(get_ticket))
        .route("/:id/assignee", get(get_ticket_assignee))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TicketListParams {
    /// Case-insensitive search over id and query text
    pub q: Option<String>,
    /// Exact status, e.g. "In Progress"
    pub status: Option<String>,
    /// Exact platform
    pub platform: Option<String>,
    /// Ticket field to sort by, default createdAt
    pub sort_by: Option<String>,
    /// asc or desc
    pub sort_order: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    pub page_size: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_count(
    name: &'static str,
    raw: Option<&str>,
    default: usize,
    max: usize,
) -> Result<usize, QueryError> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Ok(default);
    };
    let invalid = |reason: String| QueryError::InvalidNumber {
        name,
        value: raw.to_string(),
        reason,
    };
    let value: usize = raw.trim().parse().map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
    if value == 0 {
        return Err(invalid("must be at least 1".into()));
    }
    if value > max {
        return Err(invalid(format!("must not exceed {max}")));
    }
    Ok(value)
}

impl TicketListParams {
    /// Validate raw request values into an engine query
    pub fn into_query(self, config: &ApiConfig) -> Result<TicketQuery, QueryError> {
        let page = parse_count("page", self.page.as_deref(), 1, usize::MAX)?;
        let page_size = parse_count(
            "pageSize",
            self.page_size.as_deref(),
            config.default_page_size,
            config.max_page_size,
        )?;

        let sort_by = non_empty(self.sort_by);
        let field = match &sort_by {
            Some(raw) => raw.parse()?,
            None => SortField::CreatedAt,
        };
        let order = match non_empty(self.sort_order) {
            Some(raw) => raw.parse()?,
            None if sort_by.is_some() => SortOrder::Asc,
            None => SortOrder::Desc,
        };

        Ok(TicketQuery {
            filter: TicketFilter {
                search: non_empty(self.q),
                status: non_empty(self.status),
                platform: non_empty(self.platform),
            },
            sort: SortSpec { field, order },
            page,
            page_size,
        })
    }
}

/// Search, sort and page through tickets
#[utoipa::path(
    get,
    path = "/api/tickets",
    params(TicketListParams),
    responses(
        (status = 200, description = "One page of matching tickets", body = TicketPage),
        (status = 400, description = "Malformed paging or sort parameter", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn list_tickets(
    State(state): State<Arc<ApiState>>,
    params: Result<Query<TicketListParams>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<Ticket>>>> {
    let Query(params) = params?;
    let query = params.into_query(&state.config)?;
    let tickets = state.tickets.list().await?;

    let page = engine::run_query(tickets, &query);
    tracing::debug!(
        total = page.total_count,
        page = page.page,
        returned = page.items.len(),
        "listed tickets"
    );
    Ok(Json(ApiResponse::success(page)))
}

async fn load_ticket(state: &ApiState, id: &str) -> ApiResult<Ticket> {
    state
        .tickets
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Ticket {id} not found")))
}

/// Get ticket by ID
#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    params(("id" = String, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket details", body = Ticket),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn get_ticket(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Ticket>>> {
    let ticket = load_ticket(&state, &id).await?;
    Ok(Json(ApiResponse::success(ticket)))
}

/// Resolve the expert assigned to a ticket
#[utoipa::path(
    get,
    path = "/api/tickets/{id}/assignee",
    params(("id" = String, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Assigned expert, or Unassigned", body = TicketAssignee),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn get_ticket_assignee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<TicketAssignee>>> {
    let ticket = load_ticket(&state, &id).await?;
    let directory = ExpertDirectory::new(state.experts.list().await?);
    Ok(Json(ApiResponse::success(directory.assignee(&ticket))))
}
