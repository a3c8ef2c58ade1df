use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::ReportError;
use crate::presentation::rest::dto::ErrorResponse;

/// API error type
///
/// Only `title` reaches the client; internal failures carry a generic title.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub title: String,
}

impl ApiError {
    pub fn bad_request(title: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            title: title.into(),
        }
    }

    pub fn not_found(title: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            title: title.into(),
        }
    }

    pub fn internal() -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            title: "Internal server error".to_string(),
        }
    }

    pub fn invalid_payload() -> Self {
        Self::bad_request("Payload is not valid.")
    }

    pub fn invalid_query(reason: impl std::fmt::Display) -> Self {
        Self::bad_request(format!("Invalid query parameters: {}", reason))
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::AccountingWalletNotFound { .. } => ApiError::not_found(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.title));
        (self.status, body).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API Error {}: {}", self.status.as_u16(), self.title)
    }
}

impl std::error::Error for ApiError {}
