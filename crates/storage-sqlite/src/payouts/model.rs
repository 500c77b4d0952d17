//! Database models for payout requests and commissions.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use ajo_core::commission::{Commission, NewCommission};
use ajo_core::payouts::{NewPayoutRequest, PayoutRequest, PayoutStatus};
use ajo_core::Result;

use crate::utils::{decimal_to_db, format_date, parse_date, parse_decimal, parse_optional_decimal};

/// Database model for payout requests
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::payout_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PayoutRequestDB {
    pub id: String,
    pub savings_account_id: String,
    pub customer_id: String,
    pub destination_account_id: String,
    pub amount: String,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub reference: String,
    pub created_at: NaiveDateTime,
    pub decided_at: Option<NaiveDateTime>,
    pub decided_by: Option<String>,
    pub commission_amount: Option<String>,
    pub net_amount: Option<String>,
}

impl PayoutRequestDB {
    pub fn from_new(new_request: NewPayoutRequest, id: String) -> Self {
        Self {
            id,
            savings_account_id: new_request.savings_account_id,
            customer_id: new_request.customer_id,
            destination_account_id: new_request.destination_account_id,
            amount: decimal_to_db(new_request.amount),
            status: PayoutStatus::Pending.as_str().to_string(),
            rejection_reason: None,
            reference: new_request.reference,
            created_at: Utc::now().naive_utc(),
            decided_at: None,
            decided_by: None,
            commission_amount: None,
            net_amount: None,
        }
    }
}

impl TryFrom<PayoutRequestDB> for PayoutRequest {
    type Error = ajo_core::Error;

    fn try_from(db: PayoutRequestDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "amount")?,
            status: db.status.parse()?,
            commission_amount: parse_optional_decimal(
                db.commission_amount.as_deref(),
                "commission_amount",
            )?,
            net_amount: parse_optional_decimal(db.net_amount.as_deref(), "net_amount")?,
            id: db.id,
            savings_account_id: db.savings_account_id,
            customer_id: db.customer_id,
            destination_account_id: db.destination_account_id,
            rejection_reason: db.rejection_reason,
            reference: db.reference,
            created_at: db.created_at,
            decided_at: db.decided_at,
            decided_by: db.decided_by,
        })
    }
}

/// Database model for commissions
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::commissions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CommissionDB {
    pub id: String,
    pub savings_account_id: String,
    pub payout_request_id: String,
    pub business_id: String,
    pub agent_id: Option<String>,
    pub rate: String,
    pub amount: String,
    pub commission_date: String,
    pub created_at: NaiveDateTime,
}

impl CommissionDB {
    pub fn from_new(new_commission: NewCommission, id: String) -> Self {
        Self {
            id,
            savings_account_id: new_commission.savings_account_id,
            payout_request_id: new_commission.payout_request_id,
            business_id: new_commission.business_id,
            agent_id: new_commission.agent_id,
            rate: decimal_to_db(new_commission.rate),
            amount: decimal_to_db(new_commission.amount),
            commission_date: format_date(new_commission.commission_date),
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<CommissionDB> for Commission {
    type Error = ajo_core::Error;

    fn try_from(db: CommissionDB) -> Result<Self> {
        Ok(Self {
            rate: parse_decimal(&db.rate, "rate")?,
            amount: parse_decimal(&db.amount, "amount")?,
            commission_date: parse_date(&db.commission_date, "commission_date")?,
            id: db.id,
            savings_account_id: db.savings_account_id,
            payout_request_id: db.payout_request_id,
            business_id: db.business_id,
            agent_id: db.agent_id,
            created_at: db.created_at,
        })
    }
}
