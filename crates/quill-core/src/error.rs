//! Error types.
//!
//! Business outcomes (not found, missing id, unsupported method) are
//! responses, not errors. What remains here are infrastructure failures the
//! handler hands back to its caller.

use thiserror::Error;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Failures that escape [`PostHandler::handle`](crate::PostHandler::handle).
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("Malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("Invalid post id: {0:?}")]
    InvalidId(String),

    #[error("Failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}
