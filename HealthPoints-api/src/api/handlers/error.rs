use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use health_points_domain::ServiceError;

use crate::entities::ErrorResponse;

/// Errors a handler can return to the client
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be bound to the expected shape
    #[error("{0}")]
    Bind(String),

    /// The request was well-formed but semantically invalid
    #[error("{0}")]
    Validation(String),

    /// Storage failed while serving the request
    #[error("{0}")]
    Storage(String),

    /// The request did not finish within the configured timeout
    #[error("request timed out")]
    Timeout,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Bind(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => ApiError::Validation(e.to_string()),
            ServiceError::Storage(msg) => ApiError::Storage(msg),
        }
    }
}

/// Give the empty 408 produced by the timeout layer an error body
pub async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::Timeout.into_response();
    }
    response
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
