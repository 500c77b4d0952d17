use async_trait::async_trait;
use chrono::Utc;
use log::info;

use super::disbursement_model::{DisbursementInstruction, DisbursementReceipt};
use crate::errors::Result;

/// Funds-transfer executor invoked after approval.
#[async_trait]
pub trait DisbursementExecutorTrait: Send + Sync {
    async fn execute(&self, instruction: &DisbursementInstruction) -> Result<DisbursementReceipt>;
}

/// Executor that only records the instruction in the log.
///
/// Used until a payment rail is wired in.
#[derive(Clone, Default)]
pub struct LoggingDisbursementExecutor;

#[async_trait]
impl DisbursementExecutorTrait for LoggingDisbursementExecutor {
    async fn execute(&self, instruction: &DisbursementInstruction) -> Result<DisbursementReceipt> {
        info!(
            "Disbursing {} to destination {} for payout {} ({})",
            instruction.net_amount,
            instruction.destination_account_id,
            instruction.request_id,
            instruction.reference
        );
        Ok(DisbursementReceipt {
            reference: instruction.reference.clone(),
            executed_at: Utc::now().naive_utc(),
        })
    }
}
