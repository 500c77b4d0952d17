//! Authorization module - business-scoped policy for payout decisions.

mod authorization_model;
mod authorization_policy;

pub use authorization_model::{ActorContext, Role};
pub use authorization_policy::{
    can_approve, can_record_marking, can_view_account, ensure_account_owner, ensure_can_decide, eligible_scope,
};
