//! Business module - per-business commission configuration and payout destinations.
//!
//! Both are owned by collaborators outside the ledger and are read-only here.

mod business_model;
mod business_service;
mod business_traits;

pub use business_model::{BusinessConfig, PayoutDestination};
pub use business_service::BusinessConfigService;
pub use business_traits::{
    BusinessConfigProviderTrait, BusinessConfigRepositoryTrait, PayoutDestinationRepositoryTrait,
};
