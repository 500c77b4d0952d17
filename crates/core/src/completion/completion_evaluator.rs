//! Pure completion and eligibility rules.
//!
//! Nothing here touches storage. Callers persist the ACTIVE -> COMPLETED flip
//! when [`CompletionAssessment::crossed_threshold`] is set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::savings::{Marking, MarkingStatus, SavingsAccount, SavingsSchedule, SavingsStatus};

/// Sum of all marking amounts.
pub fn total_contributed(markings: &[Marking]) -> Decimal {
    markings.iter().map(|m| m.amount).sum()
}

/// True when any marking carries the disbursed flag, i.e. the account was paid.
pub fn has_disbursed_marking(markings: &[Marking]) -> bool {
    markings.iter().any(|m| m.status == MarkingStatus::Disbursed)
}

/// Fixed plans complete once contributions reach the goal. Open plans are
/// completed externally and never by this rule.
pub fn should_complete(account: &SavingsAccount, markings: &[Marking]) -> bool {
    match (account.schedule, account.goal_amount) {
        (SavingsSchedule::Fixed, Some(goal)) => total_contributed(markings) >= goal,
        _ => false,
    }
}

/// Next status of the account. COMPLETED is sticky regardless of goal edits.
pub fn evaluate(account: &SavingsAccount, markings: &[Marking]) -> SavingsStatus {
    match account.status {
        SavingsStatus::Completed => SavingsStatus::Completed,
        SavingsStatus::Active if should_complete(account, markings) => SavingsStatus::Completed,
        SavingsStatus::Active => SavingsStatus::Active,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionAssessment {
    pub account_id: String,
    pub status: SavingsStatus,
    pub total_contributed: Decimal,
    pub marking_count: usize,
    pub disbursed: bool,
    /// Set when this assessment moved the account from ACTIVE to COMPLETED.
    pub crossed_threshold: bool,
}

impl CompletionAssessment {
    /// Eligibility from the ledger side alone. The caller still has to rule
    /// out an open payout request.
    pub fn is_ledger_eligible(&self) -> bool {
        self.status == SavingsStatus::Completed && self.marking_count > 0 && !self.disbursed
    }
}

pub fn assess(account: &SavingsAccount, markings: &[Marking]) -> CompletionAssessment {
    let status = evaluate(account, markings);
    CompletionAssessment {
        account_id: account.id.clone(),
        status,
        total_contributed: total_contributed(markings),
        marking_count: markings.len(),
        disbursed: has_disbursed_marking(markings),
        crossed_threshold: account.status == SavingsStatus::Active
            && status == SavingsStatus::Completed,
    }
}

/// Outcome of the payout eligibility check, in the order the rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutEligibility {
    Eligible,
    /// Archived, not completed, empty, or already disbursed.
    NotEligible,
    /// Ledger-eligible but a PENDING or APPROVED request exists.
    OpenRequest,
}

/// The payout eligibility predicate: completed, has markings, never disbursed
/// and no PENDING or APPROVED request. Submission and the eligible listing
/// both decide through this function.
pub fn payout_eligibility(
    account: &SavingsAccount,
    assessment: &CompletionAssessment,
    has_open_request: bool,
) -> PayoutEligibility {
    if account.is_archived || !assessment.is_ledger_eligible() {
        PayoutEligibility::NotEligible
    } else if has_open_request {
        PayoutEligibility::OpenRequest
    } else {
        PayoutEligibility::Eligible
    }
}

pub fn is_payout_eligible(
    account: &SavingsAccount,
    markings: &[Marking],
    has_open_request: bool,
) -> bool {
    payout_eligibility(account, &assess(account, markings), has_open_request)
        == PayoutEligibility::Eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn account(schedule: SavingsSchedule, goal: Option<Decimal>, status: SavingsStatus) -> SavingsAccount {
        let now = Utc::now().naive_utc();
        SavingsAccount {
            id: "acc-1".to_string(),
            tracking_number: "0000000001".to_string(),
            customer_id: "cust-1".to_string(),
            business_id: "biz-7".to_string(),
            goal_amount: goal,
            schedule,
            status,
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn marking(seq: i64, amount: Decimal, status: MarkingStatus) -> Marking {
        Marking {
            id: format!("m-{}", seq),
            savings_account_id: "acc-1".to_string(),
            amount,
            marked_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status,
            payment_reference: None,
            sequence: seq,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_fixed_plan_completes_at_goal() {
        let acc = account(SavingsSchedule::Fixed, Some(dec!(50000)), SavingsStatus::Active);
        let markings = vec![
            marking(1, dec!(20000), MarkingStatus::Recorded),
            marking(2, dec!(30000), MarkingStatus::Recorded),
        ];
        let assessment = assess(&acc, &markings);
        assert_eq!(assessment.status, SavingsStatus::Completed);
        assert!(assessment.crossed_threshold);
        assert_eq!(assessment.total_contributed, dec!(50000));
        assert!(is_payout_eligible(&acc, &markings, false));
    }

    #[test]
    fn test_fixed_plan_below_goal_stays_active() {
        let acc = account(SavingsSchedule::Fixed, Some(dec!(50000)), SavingsStatus::Active);
        let markings = vec![marking(1, dec!(49999.99), MarkingStatus::Recorded)];
        assert_eq!(evaluate(&acc, &markings), SavingsStatus::Active);
        assert!(!is_payout_eligible(&acc, &markings, false));
    }

    #[test]
    fn test_completed_survives_goal_increase() {
        let acc = account(SavingsSchedule::Fixed, Some(dec!(90000)), SavingsStatus::Completed);
        let markings = vec![marking(1, dec!(50000), MarkingStatus::Recorded)];
        let assessment = assess(&acc, &markings);
        assert_eq!(assessment.status, SavingsStatus::Completed);
        assert!(!assessment.crossed_threshold);
    }

    #[test]
    fn test_open_plan_only_reads_existing_status() {
        let active = account(SavingsSchedule::Open, None, SavingsStatus::Active);
        let markings = vec![marking(1, dec!(1000000), MarkingStatus::Recorded)];
        assert_eq!(evaluate(&active, &markings), SavingsStatus::Active);

        let completed = account(SavingsSchedule::Open, None, SavingsStatus::Completed);
        assert!(is_payout_eligible(&completed, &markings, false));
    }

    #[test]
    fn test_zero_markings_never_eligible() {
        let acc = account(SavingsSchedule::Open, None, SavingsStatus::Completed);
        assert!(!is_payout_eligible(&acc, &[], false));
    }

    #[test]
    fn test_disbursed_or_open_request_blocks_eligibility() {
        let acc = account(SavingsSchedule::Fixed, Some(dec!(100)), SavingsStatus::Completed);
        let paid = vec![
            marking(1, dec!(50), MarkingStatus::Disbursed),
            marking(2, dec!(50), MarkingStatus::Recorded),
        ];
        assert!(has_disbursed_marking(&paid));
        assert!(!is_payout_eligible(&acc, &paid, false));

        let unpaid = vec![marking(1, dec!(100), MarkingStatus::Recorded)];
        assert!(!is_payout_eligible(&acc, &unpaid, true));
    }

    #[test]
    fn test_archived_account_is_not_eligible() {
        let mut acc = account(SavingsSchedule::Fixed, Some(dec!(100)), SavingsStatus::Completed);
        acc.is_archived = true;
        let markings = vec![marking(1, dec!(100), MarkingStatus::Recorded)];
        assert!(!is_payout_eligible(&acc, &markings, false));
    }

    #[test]
    fn test_ledger_rules_win_over_open_request() {
        let acc = account(SavingsSchedule::Fixed, Some(dec!(100)), SavingsStatus::Completed);
        let paid = vec![marking(1, dec!(100), MarkingStatus::Disbursed)];
        assert_eq!(
            payout_eligibility(&acc, &assess(&acc, &paid), true),
            PayoutEligibility::NotEligible
        );

        let unpaid = vec![marking(1, dec!(100), MarkingStatus::Recorded)];
        let assessment = assess(&acc, &unpaid);
        assert_eq!(
            payout_eligibility(&acc, &assessment, true),
            PayoutEligibility::OpenRequest
        );
        assert_eq!(
            payout_eligibility(&acc, &assessment, false),
            PayoutEligibility::Eligible
        );
    }
}
