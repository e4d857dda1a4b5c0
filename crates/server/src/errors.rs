use std::fmt::Display;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::{auth::errors::AuthError, errors::ServiceError};
use thiserror::Error;
use tracing::error;

/// Error returned by every API handler, rendered as
/// `{ "success": false, "message": ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    MethodNotAllowed(String),
    #[error("{message}")]
    Internal { message: String, detail: String },
}

impl ApiError {
    pub fn internal(message: impl Into<String>, detail: impl Display) -> Self {
        Self::Internal { message: message.into(), detail: detail.to_string() }
    }

    /// Map a service failure; `context` is the message shown for 500s.
    pub fn from_service(err: ServiceError, context: &str) -> Self {
        match err {
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            ServiceError::Validation(msg) => Self::BadRequest(msg),
            ServiceError::Conflict(msg) => Self::BadRequest(msg),
            other => Self::internal(context, other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Internal { message, detail } => {
                error!(error = %detail, %message, "request failed");
                serde_json::json!({"success": false, "message": message, "error": detail})
            }
            other => serde_json::json!({"success": false, "message": other.to_string()}),
        };
        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => ApiError::BadRequest(msg),
            AuthError::Conflict => ApiError::BadRequest("An account with this email already exists".into()),
            AuthError::Unauthorized => ApiError::Unauthorized("Invalid credentials".into()),
            other @ (AuthError::HashError(_) | AuthError::Repository(_)) => {
                ApiError::internal("Error during authentication", format!("[{}] {}", other.code(), other))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
