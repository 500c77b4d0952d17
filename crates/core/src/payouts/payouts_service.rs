use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::payouts_errors::PayoutError;
use super::payouts_model::{
    generate_reference, EligibleAccount, NewPayoutRequest, PayoutDecision, PayoutRequest,
    PayoutStatus,
};
use super::payouts_traits::{LedgerUnitOfWork, PayoutRepositoryTrait, PayoutServiceTrait};
use crate::authorization::{self, ActorContext};
use crate::business::{
    BusinessConfig, BusinessConfigProviderTrait, PayoutDestinationRepositoryTrait,
};
use crate::commission::{calculate_commission, NewCommission};
use crate::completion::{
    assess, has_disbursed_marking, payout_eligibility, total_contributed, CompletionServiceTrait,
    PayoutEligibility,
};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::savings::{LedgerError, LedgerRepositoryTrait};

/// Service for the payout request lifecycle (generic over the unit of work).
pub struct PayoutService<U: LedgerUnitOfWork> {
    unit_of_work: U,
    ledger: Arc<dyn LedgerRepositoryTrait>,
    payouts: Arc<dyn PayoutRepositoryTrait>,
    completion: Arc<dyn CompletionServiceTrait>,
    business_configs: Arc<dyn BusinessConfigProviderTrait>,
    destinations: Arc<dyn PayoutDestinationRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl<U: LedgerUnitOfWork> PayoutService<U> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        unit_of_work: U,
        ledger: Arc<dyn LedgerRepositoryTrait>,
        payouts: Arc<dyn PayoutRepositoryTrait>,
        completion: Arc<dyn CompletionServiceTrait>,
        business_configs: Arc<dyn BusinessConfigProviderTrait>,
        destinations: Arc<dyn PayoutDestinationRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            unit_of_work,
            ledger,
            payouts,
            completion,
            business_configs,
            destinations,
            event_sink,
        }
    }

    fn get_request_unscoped(&self, request_id: &str) -> Result<PayoutRequest> {
        self.payouts.get_request(request_id)
    }

    /// Loads the request and checks the actor may decide on it.
    ///
    /// The account business is read at decision time, not at submission.
    fn authorize_decision(
        &self,
        actor: &ActorContext,
        request_id: &str,
    ) -> Result<(PayoutRequest, String)> {
        let request = self.get_request_unscoped(request_id)?;
        let account = self.ledger.get_account(&request.savings_account_id)?;
        authorization::ensure_can_decide(actor, &account.business_id)?;
        Ok((request, account.business_id))
    }

    /// Decision that only changes the request (cancel and reject).
    async fn close_request(&self, decision: PayoutDecision) -> Result<PayoutRequest> {
        self.unit_of_work
            .run(move |tx| {
                let request = tx.get_payout_request(&decision.request_id)?;
                request.status.transition_to(decision.status)?;
                tx.apply_decision(decision)
            })
            .await
    }
}

#[async_trait]
impl<U: LedgerUnitOfWork> PayoutServiceTrait for PayoutService<U> {
    async fn submit_request(
        &self,
        actor: &ActorContext,
        account_id: &str,
        destination_account_id: &str,
    ) -> Result<PayoutRequest> {
        let account = self.ledger.get_account(account_id)?;
        authorization::ensure_account_owner(actor, &account)?;

        let destination = self
            .destinations
            .get_destination(destination_account_id)?
            .ok_or_else(|| {
                PayoutError::InvalidDestination(format!(
                    "destination {} does not exist",
                    destination_account_id
                ))
            })?;
        if destination.customer_id != actor.user_id {
            return Err(PayoutError::InvalidDestination(format!(
                "destination {} belongs to another customer",
                destination_account_id
            ))
            .into());
        }

        let config = self.business_configs.commission_config(&account.business_id)?;
        let account_id = account.id.clone();
        let customer_id = actor.user_id.clone();
        let destination_account_id = destination_account_id.to_string();

        let request = self
            .unit_of_work
            .run(move |tx| {
                let account = tx.get_savings_account(&account_id)?;
                let markings = tx.list_markings(&account_id)?;
                let assessment = assess(&account, &markings);
                if assessment.crossed_threshold && !account.is_archived {
                    tx.mark_completed(&account_id)?;
                }
                let has_open_request = tx.find_open_request(&account_id)?.is_some();
                match payout_eligibility(&account, &assessment, has_open_request) {
                    PayoutEligibility::Eligible => {}
                    PayoutEligibility::NotEligible => {
                        return Err(PayoutError::NotEligible(account_id).into())
                    }
                    PayoutEligibility::OpenRequest => {
                        return Err(PayoutError::DuplicatePending(account_id).into())
                    }
                }

                let gross = assessment.total_contributed;
                let split = calculate_commission(gross, config.commission_rate)?;
                if split.net <= Decimal::ZERO {
                    return Err(PayoutError::NotEligible(account_id).into());
                }

                tx.insert_payout_request(NewPayoutRequest {
                    savings_account_id: account_id,
                    customer_id,
                    destination_account_id,
                    amount: gross,
                    reference: generate_reference(),
                })
            })
            .await?;

        info!(
            "Payout request {} ({}) submitted for account {} with gross {}",
            request.id, request.reference, request.savings_account_id, request.amount
        );
        self.event_sink.emit(DomainEvent::payout_submitted(&request));
        Ok(request)
    }

    async fn cancel_request(
        &self,
        actor: &ActorContext,
        request_id: &str,
    ) -> Result<PayoutRequest> {
        let request = self.get_request_unscoped(request_id)?;
        if request.customer_id != actor.user_id {
            return Err(PayoutError::Forbidden(format!(
                "only the submitting customer can cancel payout request {}",
                request_id
            ))
            .into());
        }

        let cancelled = self
            .close_request(PayoutDecision {
                request_id: request.id,
                status: PayoutStatus::Cancelled,
                decided_by: actor.user_id.clone(),
                decided_at: Utc::now().naive_utc(),
                rejection_reason: None,
                split: None,
            })
            .await?;

        info!("Payout request {} cancelled", cancelled.id);
        self.event_sink.emit(DomainEvent::payout_cancelled(&cancelled));
        Ok(cancelled)
    }

    async fn approve_request(
        &self,
        actor: &ActorContext,
        request_id: &str,
    ) -> Result<PayoutRequest> {
        let (request, business_id) = self.authorize_decision(actor, request_id)?;
        let BusinessConfig {
            commission_rate,
            agent_id,
            ..
        } = self.business_configs.commission_config(&business_id)?;
        let decided_by = actor.user_id.clone();

        let approved = self
            .unit_of_work
            .run(move |tx| {
                let request = tx.get_payout_request(&request.id)?;
                request.status.transition_to(PayoutStatus::Approved)?;

                let markings = tx.list_markings(&request.savings_account_id)?;
                if has_disbursed_marking(&markings) {
                    return Err(LedgerError::AlreadyDisbursed(request.savings_account_id).into());
                }
                // Every marking flagged below must be part of the frozen gross.
                let current = total_contributed(&markings);
                if current != request.amount {
                    return Err(PayoutError::StaleAmount {
                        request_id: request.id,
                        frozen: request.amount,
                        current,
                    }
                    .into());
                }

                let split = calculate_commission(request.amount, commission_rate)?;
                let decided_at = Utc::now().naive_utc();

                let approved = tx.apply_decision(PayoutDecision {
                    request_id: request.id.clone(),
                    status: PayoutStatus::Approved,
                    decided_by,
                    decided_at,
                    rejection_reason: None,
                    split: Some(split),
                })?;
                tx.flag_disbursed(&request.savings_account_id)?;
                tx.insert_commission(NewCommission {
                    savings_account_id: request.savings_account_id.clone(),
                    payout_request_id: request.id.clone(),
                    business_id,
                    agent_id,
                    rate: split.rate,
                    amount: split.commission,
                    commission_date: decided_at.date(),
                })?;
                Ok(approved)
            })
            .await?;

        info!(
            "Payout request {} approved by {}: gross {}, commission {:?}, net {:?}",
            approved.id,
            actor.user_id,
            approved.amount,
            approved.commission_amount,
            approved.net_amount
        );
        match DomainEvent::payout_approved(&approved) {
            Some(event) => self.event_sink.emit(event),
            None => warn!("Approved request {} has no commission split", approved.id),
        }
        Ok(approved)
    }

    async fn reject_request(
        &self,
        actor: &ActorContext,
        request_id: &str,
        reason: &str,
    ) -> Result<PayoutRequest> {
        let (request, _) = self.authorize_decision(actor, request_id)?;
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(PayoutError::MissingRejectionReason.into());
        }

        let rejected = self
            .close_request(PayoutDecision {
                request_id: request.id,
                status: PayoutStatus::Rejected,
                decided_by: actor.user_id.clone(),
                decided_at: Utc::now().naive_utc(),
                rejection_reason: Some(reason.to_string()),
                split: None,
            })
            .await?;

        info!("Payout request {} rejected by {}", rejected.id, actor.user_id);
        self.event_sink.emit(DomainEvent::payout_rejected(&rejected));
        Ok(rejected)
    }

    fn get_request(&self, actor: &ActorContext, request_id: &str) -> Result<PayoutRequest> {
        let request = self.get_request_unscoped(request_id)?;
        if request.customer_id == actor.user_id {
            return Ok(request);
        }
        let account = self.ledger.get_account(&request.savings_account_id)?;
        if authorization::can_view_account(actor, &account) {
            Ok(request)
        } else {
            Err(PayoutError::Forbidden(format!(
                "user {} cannot view payout request {}",
                actor.user_id, request_id
            ))
            .into())
        }
    }

    async fn list_eligible_accounts(&self, actor: &ActorContext) -> Result<Vec<EligibleAccount>> {
        let scope = authorization::eligible_scope(actor)?;
        let accounts = self.ledger.list_accounts(&scope)?;
        let mut rates: HashMap<String, Decimal> = HashMap::new();
        let mut eligible = Vec::new();

        for account in accounts.into_iter().filter(|a| !a.is_archived) {
            let assessment = self.completion.refresh_account(&account).await?;
            let has_open_request = self.payouts.find_open_request(&account.id)?.is_some();
            if payout_eligibility(&account, &assessment, has_open_request)
                != PayoutEligibility::Eligible
            {
                continue;
            }

            let rate = match rates.get(&account.business_id) {
                Some(rate) => *rate,
                None => {
                    let rate = self
                        .business_configs
                        .commission_config(&account.business_id)?
                        .commission_rate;
                    rates.insert(account.business_id.clone(), rate);
                    rate
                }
            };
            let split = calculate_commission(assessment.total_contributed, rate)?;
            if split.net <= Decimal::ZERO {
                debug!("Skipping account {}: nothing left after commission", account.id);
                continue;
            }

            eligible.push(EligibleAccount {
                account_id: account.id,
                tracking_number: account.tracking_number,
                customer_id: account.customer_id,
                business_id: account.business_id,
                gross_amount: split.gross,
                commission_rate: split.rate,
                estimated_commission: split.commission,
                estimated_net: split.net,
            });
        }

        Ok(eligible)
    }
}
