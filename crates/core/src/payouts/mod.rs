//! Payouts module - payout request lifecycle, unit of work and service.

mod payouts_errors;
mod payouts_model;
mod payouts_service;
mod payouts_traits;


pub use payouts_errors::PayoutError;
pub use payouts_model::{
    generate_reference, EligibleAccount, NewPayoutRequest, PayoutDecision, PayoutRequest,
    PayoutStatus,
};
pub use payouts_service::PayoutService;
pub use payouts_traits::{
    LedgerTransaction, LedgerUnitOfWork, PayoutRepositoryTrait, PayoutServiceTrait,
};
