//! Savings account and marking domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::savings_errors::LedgerError;
use crate::errors::{Error, Result, ValidationError};

/// How a plan reaches completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SavingsSchedule {
    /// Fixed-cadence plan with a goal; completes when contributions reach it.
    #[default]
    Fixed,
    /// Open-ended plan; completion is decided outside the ledger.
    Open,
}

/// Lifecycle status of a savings account.
///
/// The only legal edge is `Active -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SavingsStatus {
    #[default]
    Active,
    Completed,
}

impl SavingsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SavingsStatus::Active => "ACTIVE",
            SavingsStatus::Completed => "COMPLETED",
        }
    }

    /// Validates a status change. Staying in the same status is a no-op.
    pub fn transition_to(self, next: SavingsStatus) -> std::result::Result<SavingsStatus, LedgerError> {
        match (self, next) {
            (a, b) if a == b => Ok(b),
            (SavingsStatus::Active, SavingsStatus::Completed) => Ok(next),
            (from, to) => Err(LedgerError::InvalidStatusTransition { from, to }),
        }
    }
}

impl fmt::Display for SavingsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SavingsStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ACTIVE" => Ok(SavingsStatus::Active),
            "COMPLETED" => Ok(SavingsStatus::Completed),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown savings status '{}'",
                other
            )))),
        }
    }
}

impl SavingsSchedule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SavingsSchedule::Fixed => "FIXED",
            SavingsSchedule::Open => "OPEN",
        }
    }
}

impl FromStr for SavingsSchedule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "FIXED" => Ok(SavingsSchedule::Fixed),
            "OPEN" => Ok(SavingsSchedule::Open),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown savings schedule '{}'",
                other
            )))),
        }
    }
}

/// Settlement status of a single marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkingStatus {
    #[default]
    Recorded,
    Disbursed,
}

impl MarkingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkingStatus::Recorded => "RECORDED",
            MarkingStatus::Disbursed => "DISBURSED",
        }
    }
}

impl FromStr for MarkingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RECORDED" => Ok(MarkingStatus::Recorded),
            "DISBURSED" => Ok(MarkingStatus::Disbursed),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown marking status '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a customer's savings plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsAccount {
    pub id: String,
    pub tracking_number: String,
    pub customer_id: String,
    pub business_id: String,
    /// `None` for open-ended plans without a target.
    pub goal_amount: Option<Decimal>,
    pub schedule: SavingsSchedule,
    pub status: SavingsStatus,
    pub is_archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for opening a new savings plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub customer_id: String,
    pub business_id: String,
    pub goal_amount: Option<Decimal>,
    pub schedule: SavingsSchedule,
}

impl NewSavingsAccount {
    pub fn validate(&self) -> Result<()> {
        if self.customer_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "customerId".to_string(),
            )));
        }
        if self.business_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "businessId".to_string(),
            )));
        }
        validate_goal(self.schedule, self.goal_amount)?;
        Ok(())
    }
}

/// Fixed plans need a positive goal; open plans may carry one for display.
pub fn validate_goal(schedule: SavingsSchedule, goal: Option<Decimal>) -> Result<()> {
    match (schedule, goal) {
        (SavingsSchedule::Fixed, None) => Err(LedgerError::InvalidGoal(
            "fixed plans require a goal amount".to_string(),
        )
        .into()),
        (_, Some(g)) if g <= Decimal::ZERO => {
            Err(LedgerError::InvalidGoal(format!("goal must be positive, got {}", g)).into())
        }
        _ => Ok(()),
    }
}

/// A single recorded contribution toward a savings goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Marking {
    pub id: String,
    pub savings_account_id: String,
    pub amount: Decimal,
    pub marked_date: NaiveDate,
    pub status: MarkingStatus,
    pub payment_reference: Option<String>,
    /// Insertion order within the account, used as the date tie-break.
    pub sequence: i64,
    pub created_at: NaiveDateTime,
}

impl Marking {
    /// True when `other` describes the same contribution as this marking.
    pub fn is_identical_submission(&self, other: &NewMarking) -> bool {
        self.amount == other.amount
            && self.marked_date == other.marked_date
            && self.payment_reference == other.payment_reference
    }
}

/// Input model for appending a marking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMarking {
    pub savings_account_id: String,
    pub amount: Decimal,
    pub marked_date: NaiveDate,
    pub payment_reference: Option<String>,
}

impl NewMarking {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(self.amount.to_string()).into());
        }
        if let Some(reference) = &self.payment_reference {
            if reference.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Payment reference cannot be blank".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Which accounts a listing should cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavingsAccountScope {
    Customer(String),
    Business(String),
    All,
}

/// Result of archiving a savings account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArchiveOutcome {
    /// The account had no markings and was removed.
    Deleted,
    /// The account keeps its markings and is hidden from listings.
    Archived,
}
