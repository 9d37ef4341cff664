//! # DomainError
//!
//! Centralized error handling for the Circlet domain core.
//! Maps entity and port failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Resource not found (e.g., Circle, Post, Comment)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, String),

    /// Validation failure (e.g., vote value outside +1/-1)
    #[error("validation error: {0}")]
    Validation(String),

    /// An identifier string that does not parse as a canonical token
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Unique-index violation surfaced by a persistence adapter
    /// (e.g., duplicate slug, duplicate (target, user) vote pair)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure inside an adapter
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for Circlet domain logic.
pub type Result<T> = std::result::Result<T, DomainError>;
