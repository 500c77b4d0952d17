//! Database models for business settings.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use ajo_core::business::{BusinessConfig, PayoutDestination};
use ajo_core::Result;

use crate::utils::{decimal_to_db, parse_decimal};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::business_configs)]
#[diesel(primary_key(business_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BusinessConfigDB {
    pub business_id: String,
    pub commission_rate: String,
    pub agent_id: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<BusinessConfig> for BusinessConfigDB {
    fn from(domain: BusinessConfig) -> Self {
        Self {
            business_id: domain.business_id,
            commission_rate: decimal_to_db(domain.commission_rate),
            agent_id: domain.agent_id,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<BusinessConfigDB> for BusinessConfig {
    type Error = ajo_core::Error;

    fn try_from(db: BusinessConfigDB) -> Result<Self> {
        Ok(Self {
            commission_rate: parse_decimal(&db.commission_rate, "commission_rate")?,
            business_id: db.business_id,
            agent_id: db.agent_id,
        })
    }
}

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::payout_destinations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PayoutDestinationDB {
    pub id: String,
    pub customer_id: String,
    pub created_at: NaiveDateTime,
}

impl From<PayoutDestination> for PayoutDestinationDB {
    fn from(domain: PayoutDestination) -> Self {
        Self {
            id: domain.id,
            customer_id: domain.customer_id,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl From<PayoutDestinationDB> for PayoutDestination {
    fn from(db: PayoutDestinationDB) -> Self {
        Self {
            id: db.id,
            customer_id: db.customer_id,
        }
    }
}
