use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Not found")]
    NotFound,

    #[error("Invalid stored row: {0}")]
    Decode(String),

    #[error("Custom error: {0}")]
    Custom(String),
}
