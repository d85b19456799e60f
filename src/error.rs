//! Error types for the dashboard server
//!
//! Provides unified error handling using thiserror, plus the two JSON error
//! envelopes the HTTP endpoints answer with.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Generic message returned to callers for any internal fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

// == Dashboard Error Enum ==
/// Unified error type for the dashboard server.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Requested customer does not exist
    #[error("Customer not found: {0}")]
    NotFound(String),

    /// Malformed request that cannot be defaulted
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Mock data generation failed
    #[error("Data generation failed: {0}")]
    Generation(String),

    /// The customer data source could not be read
    #[error("Data source unavailable: {0}")]
    DataSource(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    /// HTTP status this error maps to on the lookup endpoint.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            DashboardError::Generation(_)
            | DashboardError::DataSource(_)
            | DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == List Failure ==
/// Error envelope for `GET /api/customers`.
///
/// Every failure on the list endpoint is an internal fault: bad parameters are
/// defaulted, never rejected. The body is `{ "message", "error"? }` where
/// `error` is only filled in when detail exposure is enabled.
#[derive(Debug)]
pub struct ListFailure {
    pub error: DashboardError,
    pub expose_detail: bool,
}

impl ListFailure {
    pub fn new(error: DashboardError, expose_detail: bool) -> Self {
        Self {
            error,
            expose_detail,
        }
    }
}

impl IntoResponse for ListFailure {
    fn into_response(self) -> Response {
        let body = if self.expose_detail {
            json!({
                "message": INTERNAL_ERROR_MESSAGE,
                "error": self.error.to_string(),
            })
        } else {
            json!({ "message": INTERNAL_ERROR_MESSAGE })
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

// == Lookup Failure ==
/// Error envelope for `GET /api/customers/:id/orders`.
///
/// Body is `{ "success": false, "message" }`. Client errors carry a
/// descriptive message; internal faults collapse to the generic one.
#[derive(Debug)]
pub struct LookupFailure {
    pub error: DashboardError,
}

impl From<DashboardError> for LookupFailure {
    fn from(error: DashboardError) -> Self {
        Self { error }
    }
}

impl IntoResponse for LookupFailure {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let message = match &self.error {
            DashboardError::NotFound(_) => "Customer not found".to_string(),
            DashboardError::InvalidRequest(msg) => msg.clone(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the dashboard server.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            DashboardError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DashboardError::InvalidRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DashboardError::DataSource("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_list_failure_hides_detail() {
        let failure = ListFailure::new(DashboardError::DataSource("disk on fire".into()), false);
        let response = failure.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_list_failure_exposes_detail_when_enabled() {
        let failure = ListFailure::new(DashboardError::DataSource("disk on fire".into()), true);
        let json = body_json(failure.into_response()).await;
        assert!(json["error"].as_str().unwrap().contains("disk on fire"));
    }

    #[tokio::test]
    async fn test_lookup_failure_not_found() {
        let failure = LookupFailure::from(DashboardError::NotFound("abc".into()));
        let response = failure.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Customer not found");
    }

    #[tokio::test]
    async fn test_lookup_failure_internal_is_generic() {
        let failure = LookupFailure::from(DashboardError::Internal("secret path".into()));
        let json = body_json(failure.into_response()).await;
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
    }
}
