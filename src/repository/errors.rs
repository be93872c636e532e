use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found")]
    NotFound,
    /// A unique index rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The write references a missing row or is still referenced by one.
    #[error("foreign key violation: {0}")]
    ForeignKey(String),
    /// Stored data or input failed a constraint.
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(DieselError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Conflict(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKey(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info)
            | DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, info) => {
                Self::ValidationError(info.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(value: TypeConstraintError) -> Self {
        Self::ValidationError(value.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(value: serde_json::Error) -> Self {
        Self::ValidationError(value.to_string())
    }
}
