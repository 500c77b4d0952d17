//! Temp-file database fixtures shared by the repository tests.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use ajo_core::business::{PayoutDestination, PayoutDestinationRepositoryTrait};
use ajo_core::savings::{
    LedgerRepositoryTrait, Marking, NewMarking, NewSavingsAccount, SavingsAccount,
    SavingsSchedule,
};

use crate::business::PayoutDestinationRepository;
use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::savings::LedgerRepository;

pub(crate) struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    pub ledger: LedgerRepository,
    // Dropping the directory deletes the database.
    _dir: TempDir,
}

pub(crate) async fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("ajo-test.db").to_string_lossy().to_string();
    let db_path = init(&db_path).expect("Failed to init database");
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());
    let ledger = LedgerRepository::new(Arc::clone(&pool), writer.clone());
    TestDb {
        pool,
        writer,
        ledger,
        _dir: dir,
    }
}

impl TestDb {
    pub async fn fixed_account(&self, customer_id: &str, goal: Decimal) -> SavingsAccount {
        self.ledger
            .create_account(NewSavingsAccount {
                id: None,
                customer_id: customer_id.to_string(),
                business_id: "biz-1".to_string(),
                goal_amount: Some(goal),
                schedule: SavingsSchedule::Fixed,
            })
            .await
            .expect("Failed to create account")
    }

    pub async fn mark(&self, account_id: &str, amount: Decimal, day: u32) -> Marking {
        self.ledger
            .append_marking(NewMarking {
                savings_account_id: account_id.to_string(),
                amount,
                marked_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                payment_reference: None,
            })
            .await
            .expect("Failed to append marking")
    }

    pub async fn destination(&self, id: &str, customer_id: &str) -> PayoutDestination {
        PayoutDestinationRepository::new(Arc::clone(&self.pool), self.writer.clone())
            .create_destination(PayoutDestination {
                id: id.to_string(),
                customer_id: customer_id.to_string(),
            })
            .await
            .expect("Failed to create destination")
    }
}
