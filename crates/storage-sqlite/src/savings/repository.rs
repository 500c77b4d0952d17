use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::{exists, max};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use ajo_core::savings::{
    ArchiveOutcome, LedgerError, LedgerRepositoryTrait, Marking, MarkingStatus, NewMarking,
    NewSavingsAccount, SavingsAccount, SavingsAccountScope, SavingsStatus,
};
use ajo_core::Result;

use super::model::{MarkingDB, NewMarkingDB, SavingsAccountDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{is_unique_violation, StorageError};
use crate::schema::{savings_accounts, savings_markings};
use crate::utils::{decimal_to_db, generate_tracking_number};

// Tracking numbers are random; a collision just means drawing again.
const TRACKING_NUMBER_ATTEMPTS: usize = 5;

pub struct LedgerRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl LedgerRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        LedgerRepository { pool, writer }
    }
}

pub(crate) fn load_account(conn: &mut SqliteConnection, account_id: &str) -> Result<SavingsAccount> {
    savings_accounts::table
        .find(account_id)
        .select(SavingsAccountDB::as_select())
        .first::<SavingsAccountDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| LedgerError::NotFound(account_id.to_string()))?
        .try_into()
}

pub(crate) fn load_markings(conn: &mut SqliteConnection, account_id: &str) -> Result<Vec<Marking>> {
    savings_markings::table
        .filter(savings_markings::savings_account_id.eq(account_id))
        .order((savings_markings::marked_date.asc(), savings_markings::sequence.asc()))
        .select(MarkingDB::as_select())
        .load::<MarkingDB>(conn)
        .map_err(StorageError::from)?
        .into_iter()
        .map(Marking::try_from)
        .collect()
}

pub(crate) fn has_disbursed_marking(conn: &mut SqliteConnection, account_id: &str) -> Result<bool> {
    Ok(diesel::select(exists(
        savings_markings::table
            .filter(savings_markings::savings_account_id.eq(account_id))
            .filter(savings_markings::status.eq(MarkingStatus::Disbursed.as_str())),
    ))
    .get_result::<bool>(conn)
    .map_err(StorageError::from)?)
}

/// ACTIVE -> COMPLETED. The status filter makes the flip happen at most once.
pub(crate) fn complete_account(conn: &mut SqliteConnection, account_id: &str) -> Result<bool> {
    let updated = diesel::update(
        savings_accounts::table
            .find(account_id)
            .filter(savings_accounts::status.eq(SavingsStatus::Active.as_str())),
    )
    .set((
        savings_accounts::status.eq(SavingsStatus::Completed.as_str()),
        savings_accounts::updated_at.eq(Utc::now().naive_utc()),
    ))
    .execute(conn)
    .map_err(StorageError::from)?;

    if updated == 0 {
        // Either already completed or missing; the latter is an error.
        load_account(conn, account_id)?;
    }
    Ok(updated == 1)
}

fn insert_account(
    conn: &mut SqliteConnection,
    new_account: NewSavingsAccount,
) -> Result<SavingsAccountDB> {
    let id = new_account
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut attempts = 0;
    loop {
        attempts += 1;
        let row = SavingsAccountDB::from_new(new_account.clone(), id.clone(), generate_tracking_number());
        match diesel::insert_into(savings_accounts::table)
            .values(&row)
            .execute(conn)
        {
            Ok(_) => return Ok(row),
            Err(e) if is_unique_violation(&e) && attempts < TRACKING_NUMBER_ATTEMPTS => {
                debug!("Tracking number {} already taken, retrying", row.tracking_number);
            }
            Err(e) => return Err(StorageError::from(e).into()),
        }
    }
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    async fn create_account(&self, new_account: NewSavingsAccount) -> Result<SavingsAccount> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsAccount> {
                insert_account(conn, new_account)?.try_into()
            })
            .await
    }

    fn get_account(&self, account_id: &str) -> Result<SavingsAccount> {
        let mut conn = get_connection(&self.pool)?;
        load_account(&mut conn, account_id)
    }

    fn list_accounts(&self, scope: &SavingsAccountScope) -> Result<Vec<SavingsAccount>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = savings_accounts::table
            .filter(savings_accounts::is_archived.eq(false))
            .into_boxed();

        query = match scope {
            SavingsAccountScope::Customer(customer_id) => {
                query.filter(savings_accounts::customer_id.eq(customer_id.clone()))
            }
            SavingsAccountScope::Business(business_id) => {
                query.filter(savings_accounts::business_id.eq(business_id.clone()))
            }
            SavingsAccountScope::All => query,
        };

        query
            .order((savings_accounts::created_at.asc(), savings_accounts::id.asc()))
            .select(SavingsAccountDB::as_select())
            .load::<SavingsAccountDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(SavingsAccount::try_from)
            .collect()
    }

    async fn update_goal_amount(
        &self,
        account_id: &str,
        goal_amount: Option<Decimal>,
    ) -> Result<SavingsAccount> {
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsAccount> {
                let updated = diesel::update(savings_accounts::table.find(account_id.as_str()))
                    .set((
                        savings_accounts::goal_amount.eq(goal_amount.map(decimal_to_db)),
                        savings_accounts::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(LedgerError::NotFound(account_id).into());
                }
                load_account(conn, &account_id)
            })
            .await
    }

    async fn archive_account(&self, account_id: &str) -> Result<ArchiveOutcome> {
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ArchiveOutcome> {
                load_account(conn, &account_id)?;

                let marking_count: i64 = savings_markings::table
                    .filter(savings_markings::savings_account_id.eq(account_id.as_str()))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                if marking_count == 0 {
                    diesel::delete(savings_accounts::table.find(account_id.as_str()))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                    return Ok(ArchiveOutcome::Deleted);
                }

                diesel::update(savings_accounts::table.find(account_id.as_str()))
                    .set((
                        savings_accounts::is_archived.eq(true),
                        savings_accounts::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(ArchiveOutcome::Archived)
            })
            .await
    }

    async fn mark_completed(&self, account_id: &str) -> Result<bool> {
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                complete_account(conn, &account_id)
            })
            .await
    }

    async fn append_marking(&self, new_marking: NewMarking) -> Result<Marking> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Marking> {
                let account_id = new_marking.savings_account_id.clone();
                let account = load_account(conn, &account_id)?;
                if account.is_archived {
                    return Err(LedgerError::AccountArchived(account_id).into());
                }
                if has_disbursed_marking(conn, &account_id)? {
                    return Err(LedgerError::AlreadyDisbursed(account_id).into());
                }

                let last_sequence: Option<i64> = savings_markings::table
                    .filter(savings_markings::savings_account_id.eq(account_id.as_str()))
                    .select(max(savings_markings::sequence))
                    .first(conn)
                    .map_err(StorageError::from)?;

                let reference = new_marking.payment_reference.clone();
                let row = NewMarkingDB::from_new(
                    new_marking,
                    Uuid::new_v4().to_string(),
                    last_sequence.unwrap_or(0) + 1,
                );

                let inserted = diesel::insert_into(savings_markings::table)
                    .values(&row)
                    .returning(MarkingDB::as_returning())
                    .get_result::<MarkingDB>(conn);

                match inserted {
                    Ok(marking) => marking.try_into(),
                    Err(e) if is_unique_violation(&e) => match reference {
                        Some(reference) => Err(LedgerError::DuplicateReference {
                            account_id,
                            reference,
                        }
                        .into()),
                        None => Err(StorageError::from(e).into()),
                    },
                    Err(e) => Err(StorageError::from(e).into()),
                }
            })
            .await
    }

    fn list_markings(&self, account_id: &str) -> Result<Vec<Marking>> {
        let mut conn = get_connection(&self.pool)?;
        load_markings(&mut conn, account_id)
    }

    fn find_marking_by_reference(
        &self,
        account_id: &str,
        reference: &str,
    ) -> Result<Option<Marking>> {
        let mut conn = get_connection(&self.pool)?;
        savings_markings::table
            .filter(savings_markings::savings_account_id.eq(account_id))
            .filter(savings_markings::payment_reference.eq(reference))
            .select(MarkingDB::as_select())
            .first::<MarkingDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Marking::try_from)
            .transpose()
    }
}
