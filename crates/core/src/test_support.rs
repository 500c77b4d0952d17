//! In-memory ledger shared by the service tests.
//!
//! A unit of work runs against a copy of the state under the lock and swaps
//! it in only when the job succeeds, which mirrors commit and rollback.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::business::{
    BusinessConfig, BusinessConfigRepositoryTrait, PayoutDestination,
    PayoutDestinationRepositoryTrait,
};
use crate::commission::{Commission, NewCommission};
use crate::errors::{DatabaseError, Error, Result};
use crate::payouts::{
    LedgerTransaction, LedgerUnitOfWork, NewPayoutRequest, PayoutDecision, PayoutError,
    PayoutRepositoryTrait, PayoutRequest, PayoutStatus,
};
use crate::savings::{
    ArchiveOutcome, LedgerError, LedgerRepositoryTrait, Marking, MarkingStatus, NewMarking,
    NewSavingsAccount, SavingsAccount, SavingsAccountScope, SavingsSchedule, SavingsStatus,
};

#[derive(Clone, Default)]
pub(crate) struct LedgerState {
    pub accounts: Vec<SavingsAccount>,
    pub markings: Vec<Marking>,
    pub requests: Vec<PayoutRequest>,
    pub commissions: Vec<Commission>,
    pub configs: HashMap<String, BusinessConfig>,
    pub destinations: HashMap<String, PayoutDestination>,
    pub flag_disbursed_calls: HashMap<String, usize>,
    pub fail_commission_insert: bool,
    id_counter: usize,
}

impl LedgerState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.id_counter += 1;
        format!("{}-{}", prefix, self.id_counter)
    }

    fn account_mut(&mut self, account_id: &str) -> Result<&mut SavingsAccount> {
        self.accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| LedgerError::NotFound(account_id.to_string()).into())
    }

    fn account(&self, account_id: &str) -> Result<SavingsAccount> {
        self.accounts
            .iter()
            .find(|a| a.id == account_id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(account_id.to_string()).into())
    }

    fn markings_of(&self, account_id: &str) -> Vec<Marking> {
        let mut markings: Vec<Marking> = self
            .markings
            .iter()
            .filter(|m| m.savings_account_id == account_id)
            .cloned()
            .collect();
        markings.sort_by(|a, b| (a.marked_date, a.sequence).cmp(&(b.marked_date, b.sequence)));
        markings
    }

    fn open_request(&self, account_id: &str) -> Option<PayoutRequest> {
        self.requests
            .iter()
            .find(|r| r.savings_account_id == account_id && r.status.is_open())
            .cloned()
    }

    fn append(&mut self, new_marking: NewMarking) -> Result<Marking> {
        let account = self.account(&new_marking.savings_account_id)?;
        if account.is_archived {
            return Err(LedgerError::AccountArchived(account.id).into());
        }
        let existing = self.markings_of(&account.id);
        if existing.iter().any(|m| m.status == MarkingStatus::Disbursed) {
            return Err(LedgerError::AlreadyDisbursed(account.id).into());
        }
        if let Some(reference) = &new_marking.payment_reference {
            if existing
                .iter()
                .any(|m| m.payment_reference.as_ref() == Some(reference))
            {
                return Err(LedgerError::DuplicateReference {
                    account_id: account.id,
                    reference: reference.clone(),
                }
                .into());
            }
        }
        let marking = Marking {
            id: self.next_id("marking"),
            savings_account_id: account.id,
            amount: new_marking.amount,
            marked_date: new_marking.marked_date,
            status: MarkingStatus::Recorded,
            payment_reference: new_marking.payment_reference,
            sequence: existing.len() as i64 + 1,
            created_at: Utc::now().naive_utc(),
        };
        self.markings.push(marking.clone());
        Ok(marking)
    }

    fn complete(&mut self, account_id: &str) -> Result<bool> {
        let account = self.account_mut(account_id)?;
        if account.status == SavingsStatus::Completed {
            return Ok(false);
        }
        account.status = SavingsStatus::Completed;
        account.updated_at = Utc::now().naive_utc();
        Ok(true)
    }
}

impl LedgerTransaction for LedgerState {
    fn get_savings_account(&mut self, account_id: &str) -> Result<SavingsAccount> {
        self.account(account_id)
    }

    fn list_markings(&mut self, account_id: &str) -> Result<Vec<Marking>> {
        Ok(self.markings_of(account_id))
    }

    fn mark_completed(&mut self, account_id: &str) -> Result<bool> {
        self.complete(account_id)
    }

    fn find_open_request(&mut self, account_id: &str) -> Result<Option<PayoutRequest>> {
        Ok(self.open_request(account_id))
    }

    fn get_payout_request(&mut self, request_id: &str) -> Result<PayoutRequest> {
        self.requests
            .iter()
            .find(|r| r.id == request_id)
            .cloned()
            .ok_or_else(|| PayoutError::NotFound(request_id.to_string()).into())
    }

    fn insert_payout_request(&mut self, new_request: NewPayoutRequest) -> Result<PayoutRequest> {
        if self.open_request(&new_request.savings_account_id).is_some() {
            return Err(PayoutError::DuplicatePending(new_request.savings_account_id).into());
        }
        let request = PayoutRequest {
            id: self.next_id("request"),
            savings_account_id: new_request.savings_account_id,
            customer_id: new_request.customer_id,
            destination_account_id: new_request.destination_account_id,
            amount: new_request.amount,
            status: PayoutStatus::Pending,
            rejection_reason: None,
            reference: new_request.reference,
            created_at: Utc::now().naive_utc(),
            decided_at: None,
            decided_by: None,
            commission_amount: None,
            net_amount: None,
        };
        self.requests.push(request.clone());
        Ok(request)
    }

    fn apply_decision(&mut self, decision: PayoutDecision) -> Result<PayoutRequest> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == decision.request_id)
            .ok_or_else(|| Error::from(PayoutError::NotFound(decision.request_id.clone())))?;
        if request.status != PayoutStatus::Pending {
            return Err(PayoutError::InvalidTransition {
                from: request.status,
                to: decision.status,
            }
            .into());
        }
        request.status = decision.status;
        request.decided_at = Some(decision.decided_at);
        request.decided_by = Some(decision.decided_by);
        request.rejection_reason = decision.rejection_reason;
        request.commission_amount = decision.split.map(|s| s.commission);
        request.net_amount = decision.split.map(|s| s.net);
        Ok(request.clone())
    }

    fn flag_disbursed(&mut self, account_id: &str) -> Result<()> {
        *self
            .flag_disbursed_calls
            .entry(account_id.to_string())
            .or_default() += 1;
        let mut markings: Vec<&mut Marking> = self
            .markings
            .iter_mut()
            .filter(|m| m.savings_account_id == account_id)
            .collect();
        if markings.is_empty() {
            return Err(LedgerError::NotFound(account_id.to_string()).into());
        }
        if markings.iter().any(|m| m.status == MarkingStatus::Disbursed) {
            return Err(LedgerError::AlreadyDisbursed(account_id.to_string()).into());
        }
        for marking in markings.iter_mut() {
            marking.status = MarkingStatus::Disbursed;
        }
        Ok(())
    }

    fn insert_commission(&mut self, new_commission: NewCommission) -> Result<Commission> {
        if self.fail_commission_insert {
            return Err(DatabaseError::QueryFailed("commission insert failed".to_string()).into());
        }
        if self
            .commissions
            .iter()
            .any(|c| c.savings_account_id == new_commission.savings_account_id)
        {
            return Err(DatabaseError::UniqueViolation("commissions.savings_account_id".into()).into());
        }
        let commission = Commission {
            id: self.next_id("commission"),
            savings_account_id: new_commission.savings_account_id,
            payout_request_id: new_commission.payout_request_id,
            business_id: new_commission.business_id,
            agent_id: new_commission.agent_id,
            rate: new_commission.rate,
            amount: new_commission.amount,
            commission_date: new_commission.commission_date,
            created_at: Utc::now().naive_utc(),
        };
        self.commissions.push(commission.clone());
        Ok(commission)
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl InMemoryLedger {
    pub fn snapshot(&self) -> LedgerState {
        self.state.lock().unwrap().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut LedgerState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn seed_account(
        &self,
        customer_id: &str,
        business_id: &str,
        schedule: SavingsSchedule,
        goal_amount: Option<Decimal>,
    ) -> SavingsAccount {
        self.with_state(|state| {
            let now = Utc::now().naive_utc();
            let id = state.next_id("acc");
            let account = SavingsAccount {
                tracking_number: format!("{:0>10}", state.id_counter),
                id,
                customer_id: customer_id.to_string(),
                business_id: business_id.to_string(),
                goal_amount,
                schedule,
                status: SavingsStatus::Active,
                is_archived: false,
                created_at: now,
                updated_at: now,
            };
            state.accounts.push(account.clone());
            account
        })
    }

    pub fn seed_marking(&self, account_id: &str, amount: Decimal, day: u32) -> Marking {
        self.with_state(|state| {
            state
                .append(NewMarking {
                    savings_account_id: account_id.to_string(),
                    amount,
                    marked_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                    payment_reference: None,
                })
                .unwrap()
        })
    }

    pub fn seed_destination(&self, destination_id: &str, customer_id: &str) {
        self.with_state(|state| {
            state.destinations.insert(
                destination_id.to_string(),
                PayoutDestination {
                    id: destination_id.to_string(),
                    customer_id: customer_id.to_string(),
                },
            );
        });
    }

    pub fn seed_config(&self, config: BusinessConfig) {
        self.with_state(|state| {
            state.configs.insert(config.business_id.clone(), config);
        });
    }
}

#[async_trait]
impl LedgerUnitOfWork for InMemoryLedger {
    async fn run<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerTransaction) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut committed = self.state.lock().unwrap();
        let mut working = committed.clone();
        let result = job(&mut working);
        if result.is_ok() {
            *committed = working;
        }
        result
    }
}

#[async_trait]
impl LedgerRepositoryTrait for InMemoryLedger {
    async fn create_account(&self, new_account: NewSavingsAccount) -> Result<SavingsAccount> {
        Ok(self.seed_account(
            &new_account.customer_id,
            &new_account.business_id,
            new_account.schedule,
            new_account.goal_amount,
        ))
    }

    fn get_account(&self, account_id: &str) -> Result<SavingsAccount> {
        self.state.lock().unwrap().account(account_id)
    }

    fn list_accounts(&self, scope: &SavingsAccountScope) -> Result<Vec<SavingsAccount>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .accounts
            .iter()
            .filter(|a| !a.is_archived)
            .filter(|a| match scope {
                SavingsAccountScope::Customer(id) => &a.customer_id == id,
                SavingsAccountScope::Business(id) => &a.business_id == id,
                SavingsAccountScope::All => true,
            })
            .cloned()
            .collect())
    }

    async fn update_goal_amount(
        &self,
        account_id: &str,
        goal_amount: Option<Decimal>,
    ) -> Result<SavingsAccount> {
        let mut state = self.state.lock().unwrap();
        let account = state.account_mut(account_id)?;
        account.goal_amount = goal_amount;
        Ok(account.clone())
    }

    async fn archive_account(&self, account_id: &str) -> Result<ArchiveOutcome> {
        let mut state = self.state.lock().unwrap();
        if state.markings_of(account_id).is_empty() {
            state.accounts.retain(|a| a.id != account_id);
            return Ok(ArchiveOutcome::Deleted);
        }
        state.account_mut(account_id)?.is_archived = true;
        Ok(ArchiveOutcome::Archived)
    }

    async fn mark_completed(&self, account_id: &str) -> Result<bool> {
        self.state.lock().unwrap().complete(account_id)
    }

    async fn append_marking(&self, new_marking: NewMarking) -> Result<Marking> {
        self.state.lock().unwrap().append(new_marking)
    }

    fn list_markings(&self, account_id: &str) -> Result<Vec<Marking>> {
        Ok(self.state.lock().unwrap().markings_of(account_id))
    }

    fn find_marking_by_reference(
        &self,
        account_id: &str,
        reference: &str,
    ) -> Result<Option<Marking>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .markings_of(account_id)
            .into_iter()
            .find(|m| m.payment_reference.as_deref() == Some(reference)))
    }
}

impl PayoutRepositoryTrait for InMemoryLedger {
    fn get_request(&self, request_id: &str) -> Result<PayoutRequest> {
        self.state.lock().unwrap().get_payout_request(request_id)
    }

    fn find_open_request(&self, account_id: &str) -> Result<Option<PayoutRequest>> {
        Ok(self.state.lock().unwrap().open_request(account_id))
    }

    fn list_requests_for_account(&self, account_id: &str) -> Result<Vec<PayoutRequest>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.savings_account_id == account_id)
            .cloned()
            .collect())
    }

    fn get_commission_for_account(&self, account_id: &str) -> Result<Option<Commission>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .commissions
            .iter()
            .find(|c| c.savings_account_id == account_id)
            .cloned())
    }
}

#[async_trait]
impl BusinessConfigRepositoryTrait for InMemoryLedger {
    fn get_config(&self, business_id: &str) -> Result<Option<BusinessConfig>> {
        Ok(self.state.lock().unwrap().configs.get(business_id).cloned())
    }

    async fn upsert_config(&self, config: BusinessConfig) -> Result<BusinessConfig> {
        self.seed_config(config.clone());
        Ok(config)
    }
}

#[async_trait]
impl PayoutDestinationRepositoryTrait for InMemoryLedger {
    fn get_destination(&self, destination_id: &str) -> Result<Option<PayoutDestination>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .destinations
            .get(destination_id)
            .cloned())
    }

    async fn create_destination(
        &self,
        destination: PayoutDestination,
    ) -> Result<PayoutDestination> {
        self.seed_destination(&destination.id, &destination.customer_id);
        Ok(destination)
    }
}
