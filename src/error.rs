//! Request-boundary errors rendered as `ApiResponse` envelopes

use crate::models::ApiResponse;
use crate::query::QueryError;
use crate::store::StoreError;
use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("store unavailable: {0}")]
    Upstream(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::Validation(_) => "validation_error",
            ApiError::Upstream(_) => "upstream_store_error",
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Upstream(err) => tracing::error!(error = %err, "store request failed"),
            other => tracing::debug!(code = other.code(), error = %other, "request rejected"),
        }
        let body = ApiResponse::<()>::error(self.code(), &self.to_string());
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(QueryError::UnknownSortField("foo".into())).status(),
            StatusCode::BAD_REQUEST
        );
        let upstream = ApiError::from(StoreError::Unavailable("down".into()));
        assert_eq!(upstream.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(upstream.code(), "upstream_store_error");
    }

    #[test]
    fn test_validation_message() {
        let err = ApiError::from(QueryError::UnknownRange("1y".into()));
        assert_eq!(err.to_string(), "unknown range '1y', expected 24h, 7d or 30d");
    }
}
