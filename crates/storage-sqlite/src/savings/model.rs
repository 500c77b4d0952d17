//! Database models for savings accounts and markings.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use ajo_core::savings::{
    Marking, MarkingStatus, NewMarking, NewSavingsAccount, SavingsAccount, SavingsStatus,
};
use ajo_core::Result;

use crate::utils::{decimal_to_db, format_date, parse_date, parse_decimal, parse_optional_decimal};

/// Database model for savings accounts
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::savings_accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SavingsAccountDB {
    pub id: String,
    pub tracking_number: String,
    pub customer_id: String,
    pub business_id: String,
    pub goal_amount: Option<String>,
    pub schedule: String,
    pub status: String,
    pub is_archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl SavingsAccountDB {
    pub fn from_new(new_account: NewSavingsAccount, id: String, tracking_number: String) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id,
            tracking_number,
            customer_id: new_account.customer_id,
            business_id: new_account.business_id,
            goal_amount: new_account.goal_amount.map(decimal_to_db),
            schedule: new_account.schedule.as_str().to_string(),
            status: SavingsStatus::Active.as_str().to_string(),
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<SavingsAccountDB> for SavingsAccount {
    type Error = ajo_core::Error;

    fn try_from(db: SavingsAccountDB) -> Result<Self> {
        Ok(Self {
            goal_amount: parse_optional_decimal(db.goal_amount.as_deref(), "goal_amount")?,
            schedule: db.schedule.parse()?,
            status: db.status.parse()?,
            id: db.id,
            tracking_number: db.tracking_number,
            customer_id: db.customer_id,
            business_id: db.business_id,
            is_archived: db.is_archived,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

/// Database model for markings
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::savings_markings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MarkingDB {
    pub id: String,
    pub savings_account_id: String,
    pub amount: String,
    pub marked_date: String,
    pub status: String,
    pub payment_reference: Option<String>,
    pub sequence: i64,
    pub created_at: NaiveDateTime,
}

/// Database model for appending a marking
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::savings_markings)]
pub struct NewMarkingDB {
    pub id: String,
    pub savings_account_id: String,
    pub amount: String,
    pub marked_date: String,
    pub status: String,
    pub payment_reference: Option<String>,
    pub sequence: i64,
    pub created_at: NaiveDateTime,
}

impl NewMarkingDB {
    pub fn from_new(new_marking: NewMarking, id: String, sequence: i64) -> Self {
        Self {
            id,
            savings_account_id: new_marking.savings_account_id,
            amount: decimal_to_db(new_marking.amount),
            marked_date: format_date(new_marking.marked_date),
            status: MarkingStatus::Recorded.as_str().to_string(),
            payment_reference: new_marking.payment_reference,
            sequence,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<MarkingDB> for Marking {
    type Error = ajo_core::Error;

    fn try_from(db: MarkingDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "amount")?,
            marked_date: parse_date(&db.marked_date, "marked_date")?,
            status: db.status.parse()?,
            id: db.id,
            savings_account_id: db.savings_account_id,
            payment_reference: db.payment_reference,
            sequence: db.sequence,
            created_at: db.created_at,
        })
    }
}
