//! Payout repository, unit-of-work and service traits.

use async_trait::async_trait;

use super::payouts_model::{EligibleAccount, NewPayoutRequest, PayoutDecision, PayoutRequest};
use crate::authorization::ActorContext;
use crate::commission::{Commission, NewCommission};
use crate::errors::Result;
use crate::savings::{Marking, SavingsAccount};

/// Read access to payout requests outside of a unit of work.
pub trait PayoutRepositoryTrait: Send + Sync {
    fn get_request(&self, request_id: &str) -> Result<PayoutRequest>;

    /// The PENDING or APPROVED request of an account, if any.
    fn find_open_request(&self, account_id: &str) -> Result<Option<PayoutRequest>>;

    fn list_requests_for_account(&self, account_id: &str) -> Result<Vec<PayoutRequest>>;

    fn get_commission_for_account(&self, account_id: &str) -> Result<Option<Commission>>;
}

/// Operations available inside one atomic unit of work.
///
/// Everything done through a handle commits together or not at all. Flagging
/// the ledger as disbursed is only reachable from here.
pub trait LedgerTransaction {
    fn get_savings_account(&mut self, account_id: &str) -> Result<SavingsAccount>;

    fn list_markings(&mut self, account_id: &str) -> Result<Vec<Marking>>;

    /// ACTIVE -> COMPLETED. Returns `false` if the account was already completed.
    fn mark_completed(&mut self, account_id: &str) -> Result<bool>;

    fn find_open_request(&mut self, account_id: &str) -> Result<Option<PayoutRequest>>;

    fn get_payout_request(&mut self, request_id: &str) -> Result<PayoutRequest>;

    /// Inserts a PENDING request.
    ///
    /// Fails with `PayoutError::DuplicatePending` when the account already has
    /// a PENDING or APPROVED request.
    fn insert_payout_request(&mut self, new_request: NewPayoutRequest) -> Result<PayoutRequest>;

    /// Applies a decision to a request that is still PENDING.
    fn apply_decision(&mut self, decision: PayoutDecision) -> Result<PayoutRequest>;

    /// Flags every marking of the account as disbursed.
    ///
    /// Fails with `LedgerError::AlreadyDisbursed` if the account was flagged before.
    fn flag_disbursed(&mut self, account_id: &str) -> Result<()>;

    /// Fails with a unique violation if the account already carries a commission.
    fn insert_commission(&mut self, new_commission: NewCommission) -> Result<Commission>;
}

/// Runs a job against a [`LedgerTransaction`], committing on `Ok` and rolling
/// back on `Err`. Jobs are serialized against each other.
#[async_trait]
pub trait LedgerUnitOfWork: Send + Sync {
    async fn run<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerTransaction) -> Result<T> + Send + 'static,
        T: Send + 'static;
}

/// Trait defining the contract for the payout request lifecycle.
#[async_trait]
pub trait PayoutServiceTrait: Send + Sync {
    /// Creates a PENDING request for the gross amount of a payout-eligible account.
    async fn submit_request(
        &self,
        actor: &ActorContext,
        account_id: &str,
        destination_account_id: &str,
    ) -> Result<PayoutRequest>;

    /// Withdraws a PENDING request. Submitter only.
    async fn cancel_request(&self, actor: &ActorContext, request_id: &str)
        -> Result<PayoutRequest>;

    /// Approves a PENDING request, flags the ledger as disbursed and books the
    /// commission in one unit of work.
    async fn approve_request(
        &self,
        actor: &ActorContext,
        request_id: &str,
    ) -> Result<PayoutRequest>;

    /// Rejects a PENDING request. The account becomes eligible again.
    async fn reject_request(
        &self,
        actor: &ActorContext,
        request_id: &str,
        reason: &str,
    ) -> Result<PayoutRequest>;

    fn get_request(&self, actor: &ActorContext, request_id: &str) -> Result<PayoutRequest>;

    /// Accounts the actor may see that currently pass the eligibility predicate.
    async fn list_eligible_accounts(&self, actor: &ActorContext) -> Result<Vec<EligibleAccount>>;
}
