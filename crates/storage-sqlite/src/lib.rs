//! SQLite storage implementation for the Ajo ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository and unit-of-work traits defined in `ajo-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for savings, payouts and business configuration
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! Every write goes through the single writer actor, which runs each job in an
//! `IMMEDIATE` transaction.
//!
//! ```text
//!      core (domain)
//!            │
//!            ▼
//!  storage-sqlite (this crate) ──► writer actor ──► SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

#[cfg(test)]
mod test_support;

// Repository implementations
pub mod business;
pub mod payouts;
pub mod savings;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export the storage error
pub use errors::StorageError;

pub use business::{BusinessConfigRepository, PayoutDestinationRepository};
pub use payouts::{PayoutRepository, SqliteLedgerUnitOfWork};
pub use savings::LedgerRepository;

// Re-export from ajo-core for convenience
pub use ajo_core::errors::{DatabaseError, Error, Result};
