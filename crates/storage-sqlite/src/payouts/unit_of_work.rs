//! The ledger unit of work backed by the single writer connection.
//!
//! Every job runs inside one `IMMEDIATE` transaction on the writer actor, so
//! the eligibility check, the request insert, the disbursement flag and the
//! commission row of one operation commit together or not at all, and no
//! other write can interleave with them.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use uuid::Uuid;

use ajo_core::commission::{Commission, NewCommission};
use ajo_core::payouts::{
    LedgerTransaction, LedgerUnitOfWork, NewPayoutRequest, PayoutDecision, PayoutError,
    PayoutRequest, PayoutStatus,
};
use ajo_core::savings::{LedgerError, Marking, MarkingStatus, SavingsAccount};
use ajo_core::Result;

use super::model::{CommissionDB, PayoutRequestDB};
use super::repository::{load_open_request, load_request};
use crate::db::WriteHandle;
use crate::errors::{is_unique_violation, StorageError};
use crate::savings::repository::{
    complete_account, has_disbursed_marking, load_account, load_markings,
};
use crate::schema::{commissions, payout_requests, savings_markings};
use crate::utils::decimal_to_db;

pub struct SqliteLedgerUnitOfWork {
    writer: WriteHandle,
}

impl SqliteLedgerUnitOfWork {
    pub fn new(writer: WriteHandle) -> Self {
        SqliteLedgerUnitOfWork { writer }
    }
}

#[async_trait]
impl LedgerUnitOfWork for SqliteLedgerUnitOfWork {
    async fn run<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerTransaction) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<T> {
                let mut tx = SqliteLedgerTransaction { conn };
                job(&mut tx)
            })
            .await
    }
}

struct SqliteLedgerTransaction<'a> {
    conn: &'a mut SqliteConnection,
}

impl LedgerTransaction for SqliteLedgerTransaction<'_> {
    fn get_savings_account(&mut self, account_id: &str) -> Result<SavingsAccount> {
        load_account(self.conn, account_id)
    }

    fn list_markings(&mut self, account_id: &str) -> Result<Vec<Marking>> {
        load_markings(self.conn, account_id)
    }

    fn mark_completed(&mut self, account_id: &str) -> Result<bool> {
        complete_account(self.conn, account_id)
    }

    fn find_open_request(&mut self, account_id: &str) -> Result<Option<PayoutRequest>> {
        load_open_request(self.conn, account_id)
    }

    fn get_payout_request(&mut self, request_id: &str) -> Result<PayoutRequest> {
        load_request(self.conn, request_id)
    }

    fn insert_payout_request(&mut self, new_request: NewPayoutRequest) -> Result<PayoutRequest> {
        let account_id = new_request.savings_account_id.clone();
        if load_open_request(self.conn, &account_id)?.is_some() {
            return Err(PayoutError::DuplicatePending(account_id).into());
        }

        let row = PayoutRequestDB::from_new(new_request, Uuid::new_v4().to_string());
        match diesel::insert_into(payout_requests::table)
            .values(&row)
            .execute(self.conn)
        {
            Ok(_) => row.try_into(),
            // The partial unique index on open requests is the last line.
            Err(e) if is_unique_violation(&e) => Err(PayoutError::DuplicatePending(account_id).into()),
            Err(e) => Err(StorageError::from(e).into()),
        }
    }

    fn apply_decision(&mut self, decision: PayoutDecision) -> Result<PayoutRequest> {
        let current = load_request(self.conn, &decision.request_id)?;
        current.status.transition_to(decision.status)?;

        let updated = diesel::update(
            payout_requests::table
                .find(decision.request_id.as_str())
                .filter(payout_requests::status.eq(PayoutStatus::Pending.as_str())),
        )
        .set((
            payout_requests::status.eq(decision.status.as_str()),
            payout_requests::decided_at.eq(Some(decision.decided_at)),
            payout_requests::decided_by.eq(Some(decision.decided_by.as_str())),
            payout_requests::rejection_reason.eq(decision.rejection_reason.as_deref()),
            payout_requests::commission_amount
                .eq(decision.split.map(|s| decimal_to_db(s.commission))),
            payout_requests::net_amount.eq(decision.split.map(|s| decimal_to_db(s.net))),
        ))
        .execute(self.conn)
        .map_err(StorageError::from)?;

        if updated == 0 {
            return Err(PayoutError::InvalidTransition {
                from: current.status,
                to: decision.status,
            }
            .into());
        }
        debug!(
            "Payout request {} moved {} -> {}",
            decision.request_id, current.status, decision.status
        );
        load_request(self.conn, &decision.request_id)
    }

    fn flag_disbursed(&mut self, account_id: &str) -> Result<()> {
        load_account(self.conn, account_id)?;
        if has_disbursed_marking(self.conn, account_id)? {
            return Err(LedgerError::AlreadyDisbursed(account_id.to_string()).into());
        }

        let flagged = diesel::update(
            savings_markings::table.filter(savings_markings::savings_account_id.eq(account_id)),
        )
        .set(savings_markings::status.eq(MarkingStatus::Disbursed.as_str()))
        .execute(self.conn)
        .map_err(StorageError::from)?;

        debug!("Flagged {} markings of account {} as disbursed", flagged, account_id);
        Ok(())
    }

    fn insert_commission(&mut self, new_commission: NewCommission) -> Result<Commission> {
        let row = CommissionDB::from_new(new_commission, Uuid::new_v4().to_string());
        diesel::insert_into(commissions::table)
            .values(&row)
            .execute(self.conn)
            .map_err(StorageError::from)?;
        row.try_into()
    }
}
