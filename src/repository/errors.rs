use thiserror::Error;

/// Errors raised by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A pooled connection could not be acquired.
    #[error("connection error: {0}")]
    Connection(#[from] diesel::r2d2::PoolError),
    /// The database rejected a query.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    /// Embedded migrations could not be applied.
    #[error("migration error: {0}")]
    Migration(String),
    /// A stored value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// A stored value violates a domain constraint.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// The backing store refused the write.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
