use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("email already registered")]
    DuplicateEmail,

    #[error("no such user")]
    NoSuchUser,

    #[error("token not found")]
    MissingToken,

    #[error("unauthorized")]
    Unauthorized,

    #[error("role not allowed: {0}")]
    Forbidden(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            AppError::Validation(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            AppError::DuplicateEmail => (
                StatusCode::CONFLICT,
                "User already registered. Please sign in to continue.".to_string(),
            ),
            AppError::NoSuchUser => (
                StatusCode::CONFLICT,
                "No account found with this email. Please sign up first.".to_string(),
            ),
            AppError::MissingToken => (StatusCode::UNAUTHORIZED, "Token not found.".to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Forbidden(role) => (
                StatusCode::FORBIDDEN,
                format!("Role '{}' is not allowed to access this resource.", role),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong.".to_string(),
                )
            }
        };

        // Every failure path returns a structured body with a `message`
        // field; the dashboard surfaces it directly.
        (status, Json(json!({ "message": msg }))).into_response()
    }
}
