//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode};
use quill_core::error::{DomainError, RepoError};
use quill_shared::ErrorResponse;
use std::fmt;

/// Detail returned when an identifier matches no blog post.
pub const BLOG_NOT_FOUND: &str = "Blog not found";

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Any other failure. Only `operation` reaches the client; `cause` is logged.
    Internal {
        operation: &'static str,
        cause: String,
    },
}

impl AppError {
    /// Map a repository failure raised while performing `operation`.
    pub fn repo(operation: &'static str) -> impl FnOnce(RepoError) -> AppError {
        move |err| match err {
            RepoError::NotFound => AppError::NotFound(BLOG_NOT_FOUND.to_string()),
            other => AppError::Internal {
                operation,
                cause: other.to_string(),
            },
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal { operation, cause } => write!(f, "{}: {}", operation, cause),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Internal { operation, cause } => {
                tracing::error!("{}: {}", operation, cause);
                ErrorResponse::internal_error(*operation)
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

/// Reject unreadable JSON bodies with a problem-details 400.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected request body: {}", err);
    AppError::BadRequest(err.to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
