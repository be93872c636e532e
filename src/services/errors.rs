use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;
use crate::storage::StorageError;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The caller is not signed in as an administrator.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// A unique or referential constraint rejected the change.
    #[error("{0}")]
    Conflict(String),
    /// Submitted data failed validation.
    #[error("{0}")]
    Form(String),
    #[error("{0}")]
    TypeConstraint(String),
    /// An object could not be written to storage.
    #[error("{0}")]
    Storage(String),
    /// Too many requests from the same client.
    #[error("Çok fazla istek gönderdiniz. Lütfen bir dakika bekleyin.")]
    RateLimited,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl From<StorageError> for ServiceError {
    fn from(value: StorageError) -> Self {
        log::error!("Failed to access storage: {value}");
        Self::Storage("Görsel yüklenemedi".to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict(_) => Self::Conflict("Bu kayıt zaten mevcut".to_string()),
            RepositoryError::ForeignKey(_) => {
                Self::Conflict("Bağlı kayıtlar nedeniyle silinemez".to_string())
            }
            RepositoryError::ValidationError(message) => Self::Form(message),
            other => {
                log::error!("Failed to access the database: {other}");
                Self::Internal
            }
        }
    }
}
