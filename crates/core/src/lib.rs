//! Ajo Core - contribution ledger and payout authorization engine.
//!
//! This crate contains the domain rules for savings plans: recording
//! contributions, deciding when a plan is complete, and the business-scoped
//! approval workflow that turns a completed plan into a single disbursement.
//! It is database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate.

pub mod authorization;
pub mod business;
pub mod commission;
pub mod completion;
pub mod constants;
pub mod disbursement;
pub mod errors;
pub mod events;
pub mod payouts;
pub mod savings;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::ErrorKind;
pub use errors::Result;
