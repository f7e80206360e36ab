//! Domain-specific error types and error handling.
//!
//! Authentication failures are intentionally under-specific: a missing user and
//! a wrong password both surface as `InvalidCredentials`, and every token
//! defect collapses to `InvalidToken`, so callers cannot be used as a
//! validation oracle.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{field} already in use")]
    Conflict { field: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Infrastructure error: {message}")]
    Infrastructure { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Build a validation error from any displayable message
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// Build a conflict error for a uniqueness violation on `field`
    pub fn conflict(field: impl Into<String>) -> Self {
        DomainError::Conflict {
            field: field.into(),
        }
    }

    /// True for errors the client can correct and resubmit
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            DomainError::Infrastructure { .. } | DomainError::Internal { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
