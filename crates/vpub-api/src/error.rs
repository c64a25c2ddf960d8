//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use vpub_publisher::PipelineError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned for every internal failure; details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Failed to process upload";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Publish error: {0}")]
    Publish(#[from] PipelineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) | ApiError::Publish(_) | ApiError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Text safe to show to the caller.
    fn client_message(&self) -> String {
        match self {
            ApiError::Validation(msg) | ApiError::BadRequest(msg) | ApiError::PayloadTooLarge(msg) => {
                msg.clone()
            }
            ApiError::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
            ApiError::Internal(_) | ApiError::Publish(_) | ApiError::Io(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_internal() {
            error!(error = %self, "Request failed");
        }

        let mut response = (status, Json(ErrorResponse::new(self.client_message()))).into_response();
        if matches!(self, ApiError::RateLimited) {
            response
                .headers_mut()
                .insert("Retry-After", axum::http::HeaderValue::from_static("1"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::RateLimited.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ApiError::from(PipelineError::Rejected {
                reason: "quota".into(),
                attempts: 1
            })
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = ApiError::internal("database password is hunter2");
        assert_eq!(err.client_message(), INTERNAL_ERROR_MESSAGE);

        let err = ApiError::validation("Video file or URL is required");
        assert_eq!(err.client_message(), "Video file or URL is required");
    }

    #[test]
    fn test_rate_limited_response_has_retry_after() {
        let response = ApiError::RateLimited.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get("Retry-After").unwrap(), "1");
    }
}
