//! Commission module - fee retained by the business on each disbursement.

mod commission_calculator;
mod commission_errors;
mod commission_model;

pub use commission_calculator::calculate_commission;
pub use commission_errors::CommissionError;
pub use commission_model::{Commission, CommissionSplit, NewCommission};
