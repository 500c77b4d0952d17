//! SQLite storage implementation for business commission settings and payout destinations.

mod model;
mod repository;

pub use repository::{BusinessConfigRepository, PayoutDestinationRepository};
