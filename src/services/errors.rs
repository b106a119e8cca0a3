use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Outfit generation needs at least two wardrobe items.
    #[error("at least 2 wardrobe items are required to generate outfits, found {found}")]
    InsufficientItems { found: usize },
    /// An uploaded file was rejected.
    #[error("invalid file: {0}")]
    InvalidFile(String),
    /// Submitted form data failed validation.
    #[error("{0}")]
    Form(String),
    /// A value violated a domain constraint.
    #[error("{0}")]
    TypeConstraint(String),
    /// The in-memory state changed but could not be written to storage; retry
    /// persisting later.
    #[error("storage write failed: {0}")]
    Storage(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

impl ServiceError {
    /// Whether repeating the operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
