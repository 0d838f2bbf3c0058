//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Deterministic business failures only: rejected input, broken record
/// invariants, conflicting edits. There is no IO in the domain crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a non-positive box dimension).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A record invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. stale version, duplicate create).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Reject `value` unless it is a finite number greater than zero.
    pub fn ensure_positive(field: &str, value: f64) -> DomainResult<()> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::validation(format!("{field} must be greater than zero (got {value})")))
        }
    }

    /// Reject `value` unless it is a finite number that is zero or more.
    pub fn ensure_non_negative(field: &str, value: f64) -> DomainResult<()> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self::validation(format!("{field} cannot be negative (got {value})")))
        }
    }

    /// Reject blank (empty or whitespace-only) text.
    pub fn ensure_not_blank(field: &str, value: &str) -> DomainResult<()> {
        if value.trim().is_empty() {
            Err(Self::validation(format!("{field} cannot be empty")))
        } else {
            Ok(())
        }
    }
}
