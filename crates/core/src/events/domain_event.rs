//! Domain event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::payouts::PayoutRequest;

/// Domain events emitted by core services after a committed transition.
///
/// Events are facts. Consumers must not assume they are delivered exactly once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A customer submitted a payout request.
    PayoutSubmitted {
        request_id: String,
        savings_account_id: String,
        reference: String,
        gross_amount: Decimal,
    },

    /// A payout was approved and the ledger flagged as disbursed.
    /// Triggers the funds transfer.
    PayoutApproved {
        request_id: String,
        savings_account_id: String,
        destination_account_id: String,
        reference: String,
        gross_amount: Decimal,
        commission_amount: Decimal,
        net_amount: Decimal,
        approved_by: String,
    },

    PayoutRejected {
        request_id: String,
        savings_account_id: String,
        reason: String,
    },

    PayoutCancelled {
        request_id: String,
        savings_account_id: String,
    },
}

impl DomainEvent {
    pub fn payout_submitted(request: &PayoutRequest) -> Self {
        Self::PayoutSubmitted {
            request_id: request.id.clone(),
            savings_account_id: request.savings_account_id.clone(),
            reference: request.reference.clone(),
            gross_amount: request.amount,
        }
    }

    /// Creates a PayoutApproved event from an approved request.
    ///
    /// Returns `None` if the request carries no split or decider.
    pub fn payout_approved(request: &PayoutRequest) -> Option<Self> {
        Some(Self::PayoutApproved {
            request_id: request.id.clone(),
            savings_account_id: request.savings_account_id.clone(),
            destination_account_id: request.destination_account_id.clone(),
            reference: request.reference.clone(),
            gross_amount: request.amount,
            commission_amount: request.commission_amount?,
            net_amount: request.net_amount?,
            approved_by: request.decided_by.clone()?,
        })
    }

    pub fn payout_rejected(request: &PayoutRequest) -> Self {
        Self::PayoutRejected {
            request_id: request.id.clone(),
            savings_account_id: request.savings_account_id.clone(),
            reason: request.rejection_reason.clone().unwrap_or_default(),
        }
    }

    pub fn payout_cancelled(request: &PayoutRequest) -> Self {
        Self::PayoutCancelled {
            request_id: request.id.clone(),
            savings_account_id: request.savings_account_id.clone(),
        }
    }

    /// Request the event refers to.
    pub fn request_id(&self) -> &str {
        match self {
            DomainEvent::PayoutSubmitted { request_id, .. }
            | DomainEvent::PayoutApproved { request_id, .. }
            | DomainEvent::PayoutRejected { request_id, .. }
            | DomainEvent::PayoutCancelled { request_id, .. } => request_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payouts::PayoutStatus;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn approved_request() -> PayoutRequest {
        let now = Utc::now().naive_utc();
        PayoutRequest {
            id: "req-1".to_string(),
            savings_account_id: "acc-1".to_string(),
            customer_id: "cust-1".to_string(),
            destination_account_id: "dest-1".to_string(),
            amount: dec!(50000),
            status: PayoutStatus::Approved,
            rejection_reason: None,
            reference: "PR-ABC".to_string(),
            created_at: now,
            decided_at: Some(now),
            decided_by: Some("admin-1".to_string()),
            commission_amount: Some(dec!(1000)),
            net_amount: Some(dec!(49000)),
        }
    }

    #[test]
    fn test_payout_approved_carries_split() {
        let event = DomainEvent::payout_approved(&approved_request()).unwrap();
        match event {
            DomainEvent::PayoutApproved {
                net_amount,
                commission_amount,
                ..
            } => {
                assert_eq!(net_amount, dec!(49000));
                assert_eq!(commission_amount, dec!(1000));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_payout_approved_requires_split() {
        let mut request = approved_request();
        request.net_amount = None;
        assert!(DomainEvent::payout_approved(&request).is_none());
    }

    #[test]
    fn test_serialization_is_tagged() {
        let event = DomainEvent::payout_cancelled(&approved_request());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "payout_cancelled");
        assert_eq!(json["request_id"], "req-1");
    }
}
