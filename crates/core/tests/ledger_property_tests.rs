//! Property-based integration tests for the ledger money rules.
//!
//! These tests check properties that must hold for any contribution history,
//! using the `proptest` crate for random test case generation.

use ajo_core::commission::calculate_commission;
use ajo_core::completion::{assess, evaluate, is_payout_eligible};
use ajo_core::savings::{Marking, MarkingStatus, SavingsAccount, SavingsSchedule, SavingsStatus};
use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

/// Amounts in minor units between 0.01 and 100 000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|minor| Decimal::new(minor, 2))
}

/// Rates in basis points between 0% and 100%.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|bps| Decimal::new(bps, 4))
}

fn arb_markings(max_count: usize) -> impl Strategy<Value = Vec<Marking>> {
    proptest::collection::vec((arb_amount(), 1u32..=28), 0..=max_count).prop_map(|rows| {
        let now = Utc::now().naive_utc();
        rows.into_iter()
            .enumerate()
            .map(|(i, (amount, day))| Marking {
                id: format!("m-{}", i),
                savings_account_id: "acc-1".to_string(),
                amount,
                marked_date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
                status: MarkingStatus::Recorded,
                payment_reference: None,
                sequence: i as i64 + 1,
                created_at: now,
            })
            .collect()
    })
}

fn fixed_account(goal: Decimal, status: SavingsStatus) -> SavingsAccount {
    let now = Utc::now().naive_utc();
    SavingsAccount {
        id: "acc-1".to_string(),
        tracking_number: "0000000001".to_string(),
        customer_id: "cust-1".to_string(),
        business_id: "biz-1".to_string(),
        goal_amount: Some(goal),
        schedule: SavingsSchedule::Fixed,
        status,
        is_archived: false,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The split never creates or loses money, and the commission stays
    /// within the gross amount.
    #[test]
    fn prop_commission_split_conserves_gross(gross in arb_amount(), rate in arb_rate()) {
        let split = calculate_commission(gross, rate).unwrap();
        prop_assert_eq!(split.commission + split.net, gross);
        prop_assert!(split.commission >= Decimal::ZERO);
        prop_assert!(split.commission <= gross);
        prop_assert!(split.commission.scale() <= 2);
    }

    /// A fixed plan is completed exactly when contributions reach the goal.
    #[test]
    fn prop_fixed_plan_completes_at_goal(goal in arb_amount(), markings in arb_markings(12)) {
        let account = fixed_account(goal, SavingsStatus::Active);
        let total: Decimal = markings.iter().map(|m| m.amount).sum();
        let expected = if total >= goal { SavingsStatus::Completed } else { SavingsStatus::Active };
        prop_assert_eq!(evaluate(&account, &markings), expected);
    }

    /// Once completed, an account stays completed whatever the goal becomes.
    #[test]
    fn prop_completed_is_sticky(goal in arb_amount(), markings in arb_markings(6)) {
        let account = fixed_account(goal, SavingsStatus::Completed);
        let assessment = assess(&account, &markings);
        prop_assert_eq!(assessment.status, SavingsStatus::Completed);
        prop_assert!(!assessment.crossed_threshold);
    }

    /// A paid-out ledger or an open request always blocks eligibility.
    #[test]
    fn prop_disbursed_or_open_is_never_eligible(goal in arb_amount(), mut markings in arb_markings(6)) {
        let account = fixed_account(goal, SavingsStatus::Completed);
        prop_assert!(!is_payout_eligible(&account, &markings, true));
        if let Some(first) = markings.first_mut() {
            first.status = MarkingStatus::Disbursed;
        }
        prop_assert!(!is_payout_eligible(&account, &markings, false));
    }
}
