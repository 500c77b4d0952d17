use std::sync::Arc;

use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use ajo_core::commission::Commission;
use ajo_core::payouts::{PayoutError, PayoutRepositoryTrait, PayoutRequest, PayoutStatus};
use ajo_core::Result;

use super::model::{CommissionDB, PayoutRequestDB};
use crate::db::get_connection;
use crate::errors::StorageError;
use crate::schema::{commissions, payout_requests};

fn open_statuses() -> [&'static str; 2] {
    [PayoutStatus::Pending.as_str(), PayoutStatus::Approved.as_str()]
}

/// Read side of payout requests. Writes go through the ledger unit of work.
pub struct PayoutRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl PayoutRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        PayoutRepository { pool }
    }
}

pub(crate) fn load_request(conn: &mut SqliteConnection, request_id: &str) -> Result<PayoutRequest> {
    payout_requests::table
        .find(request_id)
        .select(PayoutRequestDB::as_select())
        .first::<PayoutRequestDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| PayoutError::NotFound(request_id.to_string()))?
        .try_into()
}

pub(crate) fn load_open_request(
    conn: &mut SqliteConnection,
    account_id: &str,
) -> Result<Option<PayoutRequest>> {
    payout_requests::table
        .filter(payout_requests::savings_account_id.eq(account_id))
        .filter(payout_requests::status.eq_any(open_statuses()))
        .select(PayoutRequestDB::as_select())
        .first::<PayoutRequestDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .map(PayoutRequest::try_from)
        .transpose()
}

impl PayoutRepositoryTrait for PayoutRepository {
    fn get_request(&self, request_id: &str) -> Result<PayoutRequest> {
        let mut conn = get_connection(&self.pool)?;
        load_request(&mut conn, request_id)
    }

    fn find_open_request(&self, account_id: &str) -> Result<Option<PayoutRequest>> {
        let mut conn = get_connection(&self.pool)?;
        load_open_request(&mut conn, account_id)
    }

    fn list_requests_for_account(&self, account_id: &str) -> Result<Vec<PayoutRequest>> {
        let mut conn = get_connection(&self.pool)?;
        payout_requests::table
            .filter(payout_requests::savings_account_id.eq(account_id))
            .order((payout_requests::created_at.asc(), payout_requests::id.asc()))
            .select(PayoutRequestDB::as_select())
            .load::<PayoutRequestDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(PayoutRequest::try_from)
            .collect()
    }

    fn get_commission_for_account(&self, account_id: &str) -> Result<Option<Commission>> {
        let mut conn = get_connection(&self.pool)?;
        commissions::table
            .filter(commissions::savings_account_id.eq(account_id))
            .select(CommissionDB::as_select())
            .first::<CommissionDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Commission::try_from)
            .transpose()
    }
}
