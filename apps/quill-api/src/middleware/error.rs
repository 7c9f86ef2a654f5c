//! Translation of propagated handler failures into 500 responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::HandlerError;
use quill_shared::HandlerResponse;

use crate::handlers::posts::to_http_response;

/// Failures the posts handler could not turn into a response itself.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error("request body could not be read: {0}")]
    UnreadableBody(String),

    #[error("request body is not valid UTF-8")]
    NonUtf8Body(#[from] std::string::FromUtf8Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // Already logged by the posts handler.
            Self::Handler(_) => tracing::debug!(error = %self, "Answering 500 for propagated failure"),
            _ => tracing::error!(error = %self, "Rejecting request body"),
        }
        to_http_response(HandlerResponse::error(500, "Internal server error"))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
