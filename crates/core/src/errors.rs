//! Core error types for the Ajo ledger.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use crate::commission::CommissionError;
use crate::payouts::PayoutError;
use crate::savings::LedgerError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger and payout engine.
///
/// Database-specific errors are wrapped in string form to keep this type
/// database-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Payout error: {0}")]
    Payout(#[from] PayoutError),

    #[error("Commission error: {0}")]
    Commission(#[from] CommissionError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Coarse classification used by API boundaries to decide how a failure is
/// surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any state change; the caller can correct its input.
    Validation,
    /// The actor failed the scoped policy check.
    Authorization,
    /// A race or a stale client view; the caller must re-read state.
    StateConflict,
    /// Ingestion-side idempotency violation.
    Integrity,
    NotFound,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Payout(e) => match e {
                PayoutError::NotEligible(_)
                | PayoutError::DuplicatePending(_)
                | PayoutError::MissingRejectionReason
                | PayoutError::InvalidDestination(_) => ErrorKind::Validation,
                PayoutError::Forbidden(_) => ErrorKind::Authorization,
                PayoutError::InvalidTransition { .. } | PayoutError::StaleAmount { .. } => {
                    ErrorKind::StateConflict
                }
                PayoutError::NotFound(_) => ErrorKind::NotFound,
            },
            Error::Ledger(e) => match e {
                LedgerError::DuplicateReference { .. } => ErrorKind::Integrity,
                LedgerError::AlreadyDisbursed(_) | LedgerError::InvalidStatusTransition { .. } => {
                    ErrorKind::StateConflict
                }
                LedgerError::InvalidAmount(_)
                | LedgerError::InvalidGoal(_)
                | LedgerError::AccountArchived(_)
                | LedgerError::NotOpenPlan(_) => ErrorKind::Validation,
                LedgerError::NotFound(_) => ErrorKind::NotFound,
            },
            Error::Commission(_) | Error::Validation(_) => ErrorKind::Validation,
            Error::Database(DatabaseError::NotFound(_)) => ErrorKind::NotFound,
            Error::Database(DatabaseError::UniqueViolation(_)) => ErrorKind::StateConflict,
            Error::Database(_) | Error::Unexpected(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}
