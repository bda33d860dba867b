/// Error types for community-feed
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Rejected input: empty content, malformed identifiers, bad settings
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Feed access without a signed-in session
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn post_not_found(post_id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("post {}", post_id))
    }

    /// Whether the caller should surface this as user feedback rather than a bug
    pub fn is_user_facing(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::NotFound(_))
    }
}

impl From<envy::Error> for AppError {
    fn from(err: envy::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias for feed operations
pub type Result<T> = std::result::Result<T, AppError>;
