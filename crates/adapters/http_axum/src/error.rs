//! HTTP error response mapping.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use ticketing_domain::error::TicketingError;

/// Seconds a client should wait before retrying after contention.
const RETRY_AFTER_SECS: &str = "1";

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`TicketingError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(TicketingError);

impl From<TicketingError> for ApiError {
    fn from(err: TicketingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            TicketingError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            TicketingError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            TicketingError::InsufficientInventory(err) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            TicketingError::Contention(err) => {
                tracing::warn!(error = %err, "booking lock contention");
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            TicketingError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let mut response = (status, Json(ErrorBody { error: message })).into_response();
        if self.0.is_retryable() {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
        }
        response
    }
}
