//! Commission domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Split of a gross payout into the retained commission and the net paid out.
///
/// `commission + net == gross` holds exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionSplit {
    pub gross: Decimal,
    pub rate: Decimal,
    pub commission: Decimal,
    pub net: Decimal,
}

/// Commission booked when a payout request is approved. Immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    pub id: String,
    pub savings_account_id: String,
    pub payout_request_id: String,
    pub business_id: String,
    /// Agent credited with the commission, when the business has one.
    pub agent_id: Option<String>,
    pub rate: Decimal,
    pub amount: Decimal,
    pub commission_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommission {
    pub savings_account_id: String,
    pub payout_request_id: String,
    pub business_id: String,
    pub agent_id: Option<String>,
    pub rate: Decimal,
    pub amount: Decimal,
    pub commission_date: NaiveDate,
}
