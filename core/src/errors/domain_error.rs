//! Domain-specific error types for account workflows
//!
//! Every recoverable failure in the workflow layer maps onto one of
//! these variants; the API layer turns them into the error envelope.

use thiserror::Error;

/// Result alias used throughout the domain layer
pub type DomainResult<T> = Result<T, DomainError>;

/// Unified domain error taxonomy
#[derive(Error, Debug)]
pub enum DomainError {
    /// Duplicate email/phone/field value at creation or update
    #[error("{message}")]
    Conflict { message: String },

    /// Unknown user id or other missing resource
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Unresolvable or stale token subject
    #[error("You need to login again :)")]
    InvalidSession,

    /// Email/password pair did not match a live account
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// State transition attempted against the wrong current state
    #[error("{message}")]
    Precondition { message: String },

    /// Malformed or out-of-range input
    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    /// Database failure surfaced by the repository
    #[error("Database error: {0}")]
    Database(String),

    /// Anything else that should become a generic 500
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Stable error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Conflict { .. } => "CONFLICT",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::InvalidSession => "INVALID_SESSION",
            DomainError::InvalidCredentials => "INVALID_CREDENTIALS",
            DomainError::Precondition { .. } => "PRECONDITION_FAILED",
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::Database(_) => "DATABASE_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Shorthand for a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Shorthand for a not-found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Shorthand for a precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Shorthand for an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
