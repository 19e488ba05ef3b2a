pub mod blog_repository;
pub mod lead_repository;
pub mod subscriber_repository;
pub mod user_repository;

pub use blog_repository::{BlogRepository, SqliteBlogRepository};
pub use lead_repository::{LeadRepository, SqliteLeadRepository};
pub use subscriber_repository::{SqliteSubscriberRepository, SubscriberRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Not found")]
    NotFound,
    #[error("Already exists")]
    AlreadyExists,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// SQLite reports constraint breaches through the error message; the UNIQUE
/// marker is stable across versions.
pub(crate) fn map_unique_violation(e: sqlx::Error) -> RepositoryError {
    if e.to_string().contains("UNIQUE") {
        RepositoryError::AlreadyExists
    } else {
        RepositoryError::Database(e)
    }
}
