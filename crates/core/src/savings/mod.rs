//! Savings module - ledger of savings accounts and their contribution markings.

mod savings_errors;
mod savings_model;
mod savings_service;
mod savings_traits;

#[cfg(test)]
mod savings_service_tests;


pub use savings_errors::LedgerError;
pub use savings_model::{
    validate_goal, ArchiveOutcome, Marking, MarkingStatus, NewMarking, NewSavingsAccount,
    SavingsAccount, SavingsAccountScope, SavingsSchedule, SavingsStatus,
};
pub use savings_service::LedgerService;
pub use savings_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
