use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommissionError {
    #[error("Commission rate must be between 0 and 1, got {0}")]
    InvalidRate(String),

    #[error("Gross amount cannot be negative, got {0}")]
    NegativeGross(String),
}
