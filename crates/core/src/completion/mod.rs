//! Completion module - classifies savings accounts as completed and payout-eligible.

mod completion_evaluator;
mod completion_service;

pub use completion_evaluator::{
    assess, evaluate, has_disbursed_marking, is_payout_eligible, payout_eligibility,
    should_complete, total_contributed, CompletionAssessment, PayoutEligibility,
};
pub use completion_service::{CompletionService, CompletionServiceTrait};
