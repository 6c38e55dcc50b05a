use thiserror::Error;

/// Top-level error for post, comment, and like operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Post not found: {0}")]
    NotFound(i64),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for PostError {
    fn from(err: anyhow::Error) -> Self {
        PostError::Unknown(err.to_string())
    }
}
