//! Disbursement module - hand-off to the funds-transfer executor.
//!
//! Runs after an approval has committed. A failed transfer is reported to the
//! caller for reconciliation and never touches the approved request.

mod disbursement_executor;
mod disbursement_model;

pub use disbursement_executor::{DisbursementExecutorTrait, LoggingDisbursementExecutor};
pub use disbursement_model::{DisbursementInstruction, DisbursementReceipt};
