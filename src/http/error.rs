//! Unified error handling for HTTP handlers.
//!
//! Every handler returns `Result<T, AppError>`; errors render as a JSON
//! `{"message": ...}` body with a matching status code.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    #[error("User error: {0}")]
    User(#[from] UserError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No credentials supplied.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Credentials supplied but not acceptable.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

const INTERNAL: &str = "Internal server error";

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Order(err) => match err {
                OrderError::ValidationError(_)
                | OrderError::ProductNotFound(_)
                | OrderError::InsufficientStock { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                OrderError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                OrderError::Internal(_) | OrderError::ActorCommunicationError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
                }
            },
            Self::Product(err) => match err {
                ProductError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                ProductError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                ProductError::InsufficientStock { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                ProductError::ActorCommunicationError(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string()),
            },
            Self::User(err) => match err {
                UserError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                UserError::AlreadyExists(_) => (
                    StatusCode::CONFLICT,
                    "An account with this email already exists".to_string(),
                ),
                UserError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                UserError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()),
                UserError::PasswordHash(_) | UserError::ActorCommunicationError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
                }
            },
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // Don't expose internal error details to clients, but keep them in the logs
        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
