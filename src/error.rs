use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::{error, warn};

/// Error types for the web layer.
#[derive(Error, Debug)]
pub enum AppError {
    /// A form field was missing or malformed.
    #[error("invalid form input: {0}")]
    Validation(String),

    /// Duplicate email on registration, or a title already on this shelf.
    #[error("{0}")]
    Conflict(String),

    /// Credentials that do not match a known user.
    #[error("invalid credentials")]
    Auth,

    /// The book exists but belongs to another user.
    #[error("this book belongs to another reader")]
    Forbidden,

    /// The requested book does not exist.
    #[error("book not found")]
    NotFound,

    /// Error from the database operations
    #[error("database error: {0}")]
    Storage(#[from] DbErr),

    /// Error from password hashing or verification
    #[error("password hashing error: {0}")]
    Hash(String),

    /// Error from the session store
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Unique-constraint violations come back from the driver as generic
/// execution errors, so they are recognized by message.
pub fn is_unique_violation(err: &DbErr) -> bool {
    let message = err.to_string().to_lowercase();
    message.contains("unique") || message.contains("constraint")
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Browser-form app: failed credentials land back on the login
            // form with no further detail.
            AppError::Auth => {
                warn!("rejecting invalid credentials");
                Redirect::to("/login").into_response()
            }
            AppError::Validation(message) => {
                warn!("rejecting invalid form input: {message}");
                (StatusCode::UNPROCESSABLE_ENTITY, message).into_response()
            }
            AppError::Conflict(message) => {
                warn!("conflict: {message}");
                (StatusCode::CONFLICT, message).into_response()
            }
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "this book belongs to another reader".to_string(),
            )
                .into_response(),
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, "book not found".to_string()).into_response()
            }
            // Degraded-but-alive policy: infrastructure failures are logged
            // with full detail and the browser is sent somewhere safe.
            AppError::Storage(err) => {
                error!("database failure: {err}");
                Redirect::to("/login").into_response()
            }
            AppError::Hash(err) => {
                error!("password hashing failure: {err}");
                Redirect::to("/login").into_response()
            }
            // Session teardown failures must surface, not silently redirect.
            AppError::Session(err) => {
                error!("session store failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "session store failure".to_string(),
                )
                    .into_response()
            }
        }
    }
}
