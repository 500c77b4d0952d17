use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::events::DomainEvent;

/// Money movement instructed by an approved payout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisbursementInstruction {
    pub request_id: String,
    pub savings_account_id: String,
    pub destination_account_id: String,
    pub reference: String,
    pub net_amount: Decimal,
}

impl DisbursementInstruction {
    /// Builds the instruction for a `PayoutApproved` event. Other events yield `None`.
    pub fn from_event(event: &DomainEvent) -> Option<Self> {
        match event {
            DomainEvent::PayoutApproved {
                request_id,
                savings_account_id,
                destination_account_id,
                reference,
                net_amount,
                ..
            } => Some(Self {
                request_id: request_id.clone(),
                savings_account_id: savings_account_id.clone(),
                destination_account_id: destination_account_id.clone(),
                reference: reference.clone(),
                net_amount: *net_amount,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisbursementReceipt {
    pub reference: String,
    pub executed_at: NaiveDateTime,
}
