//! SQLite storage implementation for savings accounts and markings.

mod model;
pub(crate) mod repository;

pub use repository::LedgerRepository;
