//! Scoped authorization policy.
//!
//! Every payout decision goes through [`ensure_can_decide`] so approve and
//! reject can never disagree about who is allowed to move money.

use super::authorization_model::{ActorContext, Role};
use crate::errors::Result;
use crate::payouts::PayoutError;
use crate::savings::{SavingsAccount, SavingsAccountScope};

/// Returns true if `actor` may approve or reject payouts on an account owned
/// by `account_business_id`.
///
/// Only an admin whose active business is the account's business qualifies.
/// A super admin is view-only.
pub fn can_approve(actor: &ActorContext, account_business_id: &str) -> bool {
    actor.role == Role::Admin
        && actor.active_business_id.as_deref() == Some(account_business_id)
        && actor.is_member_of(account_business_id)
}

/// [`can_approve`] as a typed failure.
pub fn ensure_can_decide(actor: &ActorContext, account_business_id: &str) -> Result<()> {
    if can_approve(actor, account_business_id) {
        return Ok(());
    }
    let reason = match actor.role {
        Role::SuperAdmin => "super admins cannot approve or reject payouts".to_string(),
        Role::Admin => format!(
            "admin {} is not assigned to business {}",
            actor.user_id, account_business_id
        ),
        role => format!("role {} cannot approve or reject payouts", role),
    };
    Err(PayoutError::Forbidden(reason).into())
}

/// Only the owning customer may request a payout on an account.
pub fn ensure_account_owner(actor: &ActorContext, account: &SavingsAccount) -> Result<()> {
    if actor.role == Role::Customer && actor.user_id == account.customer_id {
        return Ok(());
    }
    Err(PayoutError::Forbidden(format!(
        "user {} does not own savings account {}",
        actor.user_id, account.id
    ))
    .into())
}

pub fn can_view_account(actor: &ActorContext, account: &SavingsAccount) -> bool {
    match actor.role {
        Role::SuperAdmin => true,
        Role::Admin | Role::Agent => actor.is_member_of(&account.business_id),
        Role::Customer => actor.user_id == account.customer_id,
    }
}

/// Contributions are collected by the business's field staff.
pub fn can_record_marking(actor: &ActorContext, account: &SavingsAccount) -> bool {
    matches!(actor.role, Role::Agent | Role::Admin) && actor.is_member_of(&account.business_id)
}

/// Accounts the actor sees in the eligible payouts listing.
pub fn eligible_scope(actor: &ActorContext) -> Result<SavingsAccountScope> {
    match actor.role {
        Role::Customer => Ok(SavingsAccountScope::Customer(actor.user_id.clone())),
        Role::SuperAdmin => Ok(SavingsAccountScope::All),
        Role::Admin | Role::Agent => match actor.active_business_id.as_deref() {
            Some(business_id) if actor.is_member_of(business_id) => {
                Ok(SavingsAccountScope::Business(business_id.to_string()))
            }
            _ => Err(PayoutError::Forbidden(format!(
                "user {} has no active business",
                actor.user_id
            ))
            .into()),
        },
    }
}
