//! VibePulse Support Analytics API
//!
//! Read-only REST API behind the VibePulse dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         REST API (axum)                       │
//! │   /api/dashboard/*  |  /api/tickets/*  |  /api/experts/*      │
//! └───────────────────────────────────────────────────────────────┘
//!                 │                              │
//! ┌───────────────────────────────┐  ┌───────────────────────────┐
//! │      Ticket Query Engine      │  │     Expert Directory      │
//! │ filter | sort | page | counts │  │   id → expert, per call   │
//! │       Metrics Aggregator      │  │                           │
//! └───────────────────────────────┘  └───────────────────────────┘
//!                 │                              │
//! ┌───────────────────────────────────────────────────────────────┐
//! │          IndexedStore<T>  over  KvStore (seeded once)         │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod experts;
pub mod middleware;
pub mod models;
pub mod query;
pub mod routes;
pub mod store;

use axum::{routing::get, Json, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use models::*;

use store::{IndexedStore, KvStore, MemoryKv};

/// API state
#[derive(Clone)]
pub struct ApiState {
    /// API version
    pub version: String,
    pub config: ApiConfig,
    pub tickets: IndexedStore<Ticket>,
    pub experts: IndexedStore<Expert>,
}

impl ApiState {
    pub fn new(config: ApiConfig, kv: Arc<dyn KvStore>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").into(),
            config,
            tickets: IndexedStore::new(Arc::clone(&kv)),
            experts: IndexedStore::new(kv),
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(config: ApiConfig) -> Self {
        Self::new(config, Arc::new(MemoryKv::new()))
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "VibePulse API",
        version = "0.1.0",
        description = "Support ticket analytics for the VibePulse dashboard"
    ),
    paths(
        routes::health::health_check,
        routes::dashboard::get_metrics,
        routes::dashboard::get_trends,
        routes::dashboard::get_performance,
        routes::tickets::list_tickets,
        routes::tickets::get_ticket,
        routes::tickets::get_ticket_assignee,
        routes::experts::list_experts,
        routes::experts::get_expert,
    ),
    components(
        schemas(
            ErrorResponse,
            Ticket, TicketStatus, TicketAssignee, TicketPage,
            Expert,
            DashboardMetrics, MetricValue,
            TrendDataPoint, TrendsResponse, OverTimeDataPoint,
            routes::health::HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Dashboard KPIs, trends and time series"),
        (name = "tickets", description = "Ticket search and lookup"),
        (name = "experts", description = "Expert reference data")
    )
)]
pub struct ApiDoc;

/// Build the API router
pub fn build_router(state: ApiState) -> Router {
    let state = Arc::new(state);
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api", api_routes(Arc::clone(&state)))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn api_routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new()
        .nest("/dashboard", routes::dashboard::router())
        .nest("/tickets", routes::tickets::router())
        .nest("/experts", routes::experts::router())
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::seed::ensure_seed,
        ))
}
