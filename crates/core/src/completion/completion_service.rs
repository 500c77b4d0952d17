use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::completion_evaluator::{assess, CompletionAssessment};
use crate::errors::Result;
use crate::savings::{LedgerRepositoryTrait, SavingsAccount, SavingsStatus};

#[async_trait]
pub trait CompletionServiceTrait: Send + Sync {
    /// Re-evaluates the account and persists the one-way completion flip.
    async fn refresh(&self, account_id: &str) -> Result<CompletionAssessment>;

    /// Same as [`refresh`](Self::refresh) for an account that was already loaded.
    async fn refresh_account(&self, account: &SavingsAccount) -> Result<CompletionAssessment>;
}

pub struct CompletionService {
    ledger: Arc<dyn LedgerRepositoryTrait>,
}

impl CompletionService {
    pub fn new(ledger: Arc<dyn LedgerRepositoryTrait>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl CompletionServiceTrait for CompletionService {
    async fn refresh(&self, account_id: &str) -> Result<CompletionAssessment> {
        let account = self.ledger.get_account(account_id)?;
        self.refresh_account(&account).await
    }

    async fn refresh_account(&self, account: &SavingsAccount) -> Result<CompletionAssessment> {
        let markings = self.ledger.list_markings(&account.id)?;
        let assessment = assess(account, &markings);

        if assessment.crossed_threshold {
            account.status.transition_to(SavingsStatus::Completed)?;
            if self.ledger.mark_completed(&account.id).await? {
                info!(
                    "Savings account {} reached its goal with {} contributed",
                    account.id, assessment.total_contributed
                );
            }
        }
        Ok(assessment)
    }
}
