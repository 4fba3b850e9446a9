use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::http::header::WWW_AUTHENTICATE;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Application-wide error types with appropriate HTTP status codes.
///
/// Authentication and validation failures are client errors and their
/// messages are returned verbatim in the `detail` field. Server-side errors
/// are logged in full but only a generic message reaches the client.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for API endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code
    #[schema(example = "unauthorized")]
    pub error: String,
    /// Human-readable description
    #[schema(example = "API key is required")]
    pub detail: String,
}

impl AppError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ConfigError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code used in the `error` field.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ConfigError(_) => "config_error",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::Validation(_) => "validation_error",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let detail = match &self {
            AppError::Unauthorized(msg) | AppError::Forbidden(msg) | AppError::Validation(msg) => {
                msg.clone()
            }
            AppError::PayloadTooLarge(_) => "Request body exceeds the maximum allowed size".to_string(),
            AppError::ConfigError(_) => "Service configuration error. Please contact support.".to_string(),
            AppError::Internal(_) => {
                "An internal error occurred. Please contact support if the issue persists.".to_string()
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = axum::Json(ErrorResponse {
            error: self.error_code().to_string(),
            detail,
        });

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(WWW_AUTHENTICATE, "API-Key")], body).into_response();
        }

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }

        let detail = match &rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`".to_string()
            }
            JsonRejection::JsonSyntaxError(_) => "Malformed JSON in request body".to_string(),
            JsonRejection::JsonDataError(e) => sanitize_data_error(&e.body_text()),
            JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
            _ => "Invalid request format".to_string(),
        };

        AppError::Validation(detail)
    }
}

/// Sanitize deserialization error messages to avoid leaking internal type information.
///
/// Serde errors can contain internal struct names which shouldn't be
/// exposed to external clients. Only the offending field name is kept.
pub(crate) fn sanitize_data_error(msg: &str) -> String {
    if msg.contains("missing field")
        && let Some(start) = msg.find('`')
        && let Some(end) = msg[start + 1..].find('`')
    {
        let field = &msg[start + 1..start + 1 + end];
        return format!("Missing required field: {field}");
    }

    if msg.contains("invalid type") {
        return "Invalid data type in request body".to_string();
    }

    "Invalid request format".to_string()
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
