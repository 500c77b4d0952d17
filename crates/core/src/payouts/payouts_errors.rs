use rust_decimal::Decimal;
use thiserror::Error;

use super::payouts_model::PayoutStatus;

/// Errors raised by the payout request lifecycle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayoutError {
    #[error("Savings account {0} is not eligible for payout")]
    NotEligible(String),

    #[error("Savings account {0} already has a pending or approved payout request")]
    DuplicatePending(String),

    #[error("A rejection reason is required")]
    MissingRejectionReason,

    #[error("Invalid payout destination: {0}")]
    InvalidDestination(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Payout request cannot move from {from} to {to}")]
    InvalidTransition { from: PayoutStatus, to: PayoutStatus },

    #[error("Payout request {request_id} froze {frozen} but the account now holds {current}")]
    StaleAmount {
        request_id: String,
        frozen: Decimal,
        current: Decimal,
    },

    #[error("Payout request not found: {0}")]
    NotFound(String),
}
