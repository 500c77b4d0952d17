//! Ledger repository and service traits.
//!
//! The repository is the durable store for savings accounts and their
//! markings. It holds no business rules beyond the integrity checks the
//! store itself must guarantee (reference uniqueness, archived and disbursed
//! guards on append).

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::savings_model::{
    ArchiveOutcome, Marking, NewMarking, NewSavingsAccount, SavingsAccount, SavingsAccountScope,
};
use crate::errors::Result;

/// Trait defining the contract for ledger persistence.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Creates a new savings account in ACTIVE status with a fresh tracking number.
    async fn create_account(&self, new_account: NewSavingsAccount) -> Result<SavingsAccount>;

    /// Retrieves a savings account by its ID.
    fn get_account(&self, account_id: &str) -> Result<SavingsAccount>;

    /// Lists non-archived accounts covered by `scope`.
    fn list_accounts(&self, scope: &SavingsAccountScope) -> Result<Vec<SavingsAccount>>;

    /// Replaces the goal amount. Status is left untouched.
    async fn update_goal_amount(
        &self,
        account_id: &str,
        goal_amount: Option<Decimal>,
    ) -> Result<SavingsAccount>;

    /// Deletes an account without markings, otherwise flags it archived.
    async fn archive_account(&self, account_id: &str) -> Result<ArchiveOutcome>;

    /// Flips ACTIVE to COMPLETED.
    ///
    /// Returns `true` if this call performed the flip, `false` if the account
    /// was already COMPLETED.
    async fn mark_completed(&self, account_id: &str) -> Result<bool>;

    /// Appends a marking.
    ///
    /// Fails with `LedgerError::DuplicateReference` when the reference was
    /// already recorded for the account, `AccountArchived` for archived
    /// accounts and `AlreadyDisbursed` once the account has been paid out.
    async fn append_marking(&self, new_marking: NewMarking) -> Result<Marking>;

    /// Lists markings ordered by date, ties broken by insertion order.
    fn list_markings(&self, account_id: &str) -> Result<Vec<Marking>>;

    /// Looks up a marking by its external payment reference.
    fn find_marking_by_reference(
        &self,
        account_id: &str,
        reference: &str,
    ) -> Result<Option<Marking>>;
}

/// Trait defining the contract for ledger service operations.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    /// Opens a new savings plan.
    async fn open_account(&self, new_account: NewSavingsAccount) -> Result<SavingsAccount>;

    fn get_account(&self, account_id: &str) -> Result<SavingsAccount>;

    fn list_accounts(&self, scope: &SavingsAccountScope) -> Result<Vec<SavingsAccount>>;

    fn list_markings(&self, account_id: &str) -> Result<Vec<Marking>>;

    /// Records a contribution coming from the ingestion path.
    ///
    /// A re-delivered marking whose reference, amount and date all match an
    /// existing one is treated as already recorded and the existing marking
    /// is returned. A reference reused with different content is rejected.
    async fn record_marking(&self, new_marking: NewMarking) -> Result<Marking>;

    /// Edits the goal. Completion, once reached, is kept.
    async fn update_goal_amount(
        &self,
        account_id: &str,
        goal_amount: Option<Decimal>,
    ) -> Result<SavingsAccount>;

    async fn archive_account(&self, account_id: &str) -> Result<ArchiveOutcome>;

    /// Marks an open-ended plan as completed.
    async fn complete_open_plan(&self, account_id: &str) -> Result<SavingsAccount>;
}
