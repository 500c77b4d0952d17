//! Payout request domain models and state machine.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payouts_errors::PayoutError;
use crate::commission::CommissionSplit;
use crate::constants::PAYOUT_REFERENCE_PREFIX;
use crate::errors::{Error, Result, ValidationError};

/// Status of a payout request.
///
/// `Pending` is the only non-terminal state. It may move to any of the three
/// terminal states, which admit no further transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "PENDING",
            PayoutStatus::Approved => "APPROVED",
            PayoutStatus::Rejected => "REJECTED",
            PayoutStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PayoutStatus::Pending)
    }

    /// PENDING and APPROVED requests block a new submission on the account.
    pub fn is_open(&self) -> bool {
        matches!(self, PayoutStatus::Pending | PayoutStatus::Approved)
    }

    pub fn transition_to(self, next: PayoutStatus) -> std::result::Result<PayoutStatus, PayoutError> {
        match (self, next) {
            (PayoutStatus::Pending, PayoutStatus::Approved)
            | (PayoutStatus::Pending, PayoutStatus::Rejected)
            | (PayoutStatus::Pending, PayoutStatus::Cancelled) => Ok(next),
            (from, to) => Err(PayoutError::InvalidTransition { from, to }),
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayoutStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PENDING" => Ok(PayoutStatus::Pending),
            "APPROVED" => Ok(PayoutStatus::Approved),
            "REJECTED" => Ok(PayoutStatus::Rejected),
            "CANCELLED" => Ok(PayoutStatus::Cancelled),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown payout status '{}'",
                other
            )))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRequest {
    pub id: String,
    pub savings_account_id: String,
    /// Customer who submitted the request.
    pub customer_id: String,
    pub destination_account_id: String,
    /// Gross amount frozen from the markings at submission.
    pub amount: Decimal,
    pub status: PayoutStatus,
    pub rejection_reason: Option<String>,
    pub reference: String,
    pub created_at: NaiveDateTime,
    pub decided_at: Option<NaiveDateTime>,
    pub decided_by: Option<String>,
    pub commission_amount: Option<Decimal>,
    pub net_amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayoutRequest {
    pub savings_account_id: String,
    pub customer_id: String,
    pub destination_account_id: String,
    pub amount: Decimal,
    pub reference: String,
}

/// A terminal transition applied to a pending request.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutDecision {
    pub request_id: String,
    pub status: PayoutStatus,
    pub decided_by: String,
    pub decided_at: NaiveDateTime,
    pub rejection_reason: Option<String>,
    pub split: Option<CommissionSplit>,
}

/// Account that may be paid out, with the split the customer would receive.
///
/// The commission shown here is an estimate. It is only booked on approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibleAccount {
    pub account_id: String,
    pub tracking_number: String,
    pub customer_id: String,
    pub business_id: String,
    pub gross_amount: Decimal,
    pub commission_rate: Decimal,
    pub estimated_commission: Decimal,
    pub estimated_net: Decimal,
}

/// Generates a unique external reference such as `PR-0190F3A1...`.
pub fn generate_reference() -> String {
    format!(
        "{}-{}",
        PAYOUT_REFERENCE_PREFIX,
        Uuid::now_v7().simple().to_string().to_uppercase()
    )
}
