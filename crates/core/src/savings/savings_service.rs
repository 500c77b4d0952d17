use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;

use super::savings_errors::LedgerError;
use super::savings_model::{
    validate_goal, ArchiveOutcome, Marking, NewMarking, NewSavingsAccount, SavingsAccount,
    SavingsAccountScope, SavingsSchedule, SavingsStatus,
};
use super::savings_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::errors::{Error, Result};

/// Service for the contribution ledger.
pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
}

impl LedgerService {
    pub fn new(repository: Arc<dyn LedgerRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Resolves a duplicate reference against the stored marking.
    fn resolve_duplicate(&self, new_marking: &NewMarking, reference: &str) -> Result<Marking> {
        match self
            .repository
            .find_marking_by_reference(&new_marking.savings_account_id, reference)?
        {
            Some(existing) if existing.is_identical_submission(new_marking) => {
                debug!(
                    "Marking with reference {} already recorded for account {}",
                    reference, new_marking.savings_account_id
                );
                Ok(existing)
            }
            _ => Err(LedgerError::DuplicateReference {
                account_id: new_marking.savings_account_id.clone(),
                reference: reference.to_string(),
            }
            .into()),
        }
    }
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn open_account(&self, new_account: NewSavingsAccount) -> Result<SavingsAccount> {
        new_account.validate()?;
        let account = self.repository.create_account(new_account).await?;
        info!(
            "Opened savings account {} ({}) for customer {}",
            account.id, account.tracking_number, account.customer_id
        );
        Ok(account)
    }

    fn get_account(&self, account_id: &str) -> Result<SavingsAccount> {
        self.repository.get_account(account_id)
    }

    fn list_accounts(&self, scope: &SavingsAccountScope) -> Result<Vec<SavingsAccount>> {
        self.repository.list_accounts(scope)
    }

    fn list_markings(&self, account_id: &str) -> Result<Vec<Marking>> {
        self.repository.list_markings(account_id)
    }

    async fn record_marking(&self, new_marking: NewMarking) -> Result<Marking> {
        new_marking.validate()?;

        if let Some(reference) = new_marking.payment_reference.as_deref() {
            if self
                .repository
                .find_marking_by_reference(&new_marking.savings_account_id, reference)?
                .is_some()
            {
                return self.resolve_duplicate(&new_marking, reference);
            }
        }

        match self.repository.append_marking(new_marking.clone()).await {
            Ok(marking) => {
                debug!(
                    "Recorded marking {} of {} on account {}",
                    marking.id, marking.amount, marking.savings_account_id
                );
                Ok(marking)
            }
            // Lost a race with a concurrent delivery of the same reference.
            Err(Error::Ledger(LedgerError::DuplicateReference { reference, .. })) => {
                self.resolve_duplicate(&new_marking, &reference)
            }
            Err(e) => Err(e),
        }
    }

    async fn update_goal_amount(
        &self,
        account_id: &str,
        goal_amount: Option<Decimal>,
    ) -> Result<SavingsAccount> {
        let account = self.repository.get_account(account_id)?;
        if account.is_archived {
            return Err(LedgerError::AccountArchived(account.id).into());
        }
        validate_goal(account.schedule, goal_amount)?;
        self.repository
            .update_goal_amount(account_id, goal_amount)
            .await
    }

    async fn archive_account(&self, account_id: &str) -> Result<ArchiveOutcome> {
        let outcome = self.repository.archive_account(account_id).await?;
        info!("Savings account {} archive outcome: {:?}", account_id, outcome);
        Ok(outcome)
    }

    async fn complete_open_plan(&self, account_id: &str) -> Result<SavingsAccount> {
        let account = self.repository.get_account(account_id)?;
        if account.schedule != SavingsSchedule::Open {
            return Err(LedgerError::NotOpenPlan(account.id).into());
        }
        if account.is_archived {
            return Err(LedgerError::AccountArchived(account.id).into());
        }
        account.status.transition_to(SavingsStatus::Completed)?;

        if self.repository.mark_completed(account_id).await? {
            info!("Open plan {} marked as completed", account_id);
        }
        self.repository.get_account(account_id)
    }
}
