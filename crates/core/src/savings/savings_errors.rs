use thiserror::Error;

use super::savings_model::SavingsStatus;

/// Errors raised by the contribution ledger.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Payment reference '{reference}' was already recorded for savings account {account_id}")]
    DuplicateReference {
        account_id: String,
        reference: String,
    },

    #[error("Savings account {0} has already been disbursed")]
    AlreadyDisbursed(String),

    #[error("Marking amount must be positive, got {0}")]
    InvalidAmount(String),

    #[error("Invalid goal amount: {0}")]
    InvalidGoal(String),

    #[error("Savings account {0} is archived")]
    AccountArchived(String),

    #[error("Savings account {0} is not an open-ended plan")]
    NotOpenPlan(String),

    #[error("Savings status cannot move from {from} to {to}")]
    InvalidStatusTransition { from: SavingsStatus, to: SavingsStatus },

    #[error("Savings account not found: {0}")]
    NotFound(String),
}
