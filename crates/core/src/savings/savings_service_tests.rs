#[cfg(test)]
mod tests {
    use crate::errors::{Error, ErrorKind};
    use crate::savings::{
        ArchiveOutcome, LedgerError, LedgerService, LedgerServiceTrait, NewMarking,
        NewSavingsAccount, SavingsSchedule, SavingsStatus,
    };
    use crate::test_support::InMemoryLedger;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service() -> (InMemoryLedger, LedgerService) {
        let ledger = InMemoryLedger::default();
        let service = LedgerService::new(Arc::new(ledger.clone()));
        (ledger, service)
    }

    fn marking(account_id: &str, amount: rust_decimal::Decimal, day: u32, reference: Option<&str>) -> NewMarking {
        NewMarking {
            savings_account_id: account_id.to_string(),
            amount,
            marked_date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            payment_reference: reference.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_open_account_starts_active() {
        let (_, service) = service();
        let account = service
            .open_account(NewSavingsAccount {
                id: None,
                customer_id: "cust-1".to_string(),
                business_id: "biz-7".to_string(),
                goal_amount: Some(dec!(50000)),
                schedule: SavingsSchedule::Fixed,
            })
            .await
            .unwrap();
        assert_eq!(account.status, SavingsStatus::Active);
        assert!(!account.is_archived);
    }

    #[tokio::test]
    async fn test_markings_are_ordered_by_date_then_insertion() {
        let (ledger, service) = service();
        let account = ledger.seed_account("cust-1", "biz-7", SavingsSchedule::Fixed, Some(dec!(100)));

        let late = service.record_marking(marking(&account.id, dec!(10), 20, None)).await.unwrap();
        let first_same_day = service.record_marking(marking(&account.id, dec!(20), 5, None)).await.unwrap();
        let second_same_day = service.record_marking(marking(&account.id, dec!(30), 5, None)).await.unwrap();

        let ids: Vec<String> = service
            .list_markings(&account.id)
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![first_same_day.id, second_same_day.id, late.id]);
    }

    #[tokio::test]
    async fn test_identical_redelivery_is_a_no_op() {
        let (ledger, service) = service();
        let account = ledger.seed_account("cust-1", "biz-7", SavingsSchedule::Fixed, Some(dec!(100)));

        let first = service
            .record_marking(marking(&account.id, dec!(25), 1, Some("PAY-1")))
            .await
            .unwrap();
        let again = service
            .record_marking(marking(&account.id, dec!(25), 1, Some("PAY-1")))
            .await
            .unwrap();

        assert_eq!(first.id, again.id);
        let markings = service.list_markings(&account.id).unwrap();
        assert_eq!(markings.len(), 1);
        assert_eq!(markings.iter().map(|m| m.amount).sum::<rust_decimal::Decimal>(), dec!(25));
    }

    #[tokio::test]
    async fn test_reused_reference_with_different_content_is_rejected() {
        let (ledger, service) = service();
        let account = ledger.seed_account("cust-1", "biz-7", SavingsSchedule::Fixed, Some(dec!(100)));

        service
            .record_marking(marking(&account.id, dec!(25), 1, Some("PAY-1")))
            .await
            .unwrap();
        let err = service
            .record_marking(marking(&account.id, dec!(30), 1, Some("PAY-1")))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Ledger(LedgerError::DuplicateReference { .. })
        ));
        assert_eq!(err.kind(), ErrorKind::Integrity);
        assert_eq!(service.list_markings(&account.id).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_same_reference_on_other_account_is_allowed() {
        let (ledger, service) = service();
        let a = ledger.seed_account("cust-1", "biz-7", SavingsSchedule::Fixed, Some(dec!(100)));
        let b = ledger.seed_account("cust-2", "biz-7", SavingsSchedule::Fixed, Some(dec!(100)));

        service.record_marking(marking(&a.id, dec!(25), 1, Some("PAY-1"))).await.unwrap();
        service.record_marking(marking(&b.id, dec!(25), 1, Some("PAY-1"))).await.unwrap();
    }

    #[tokio::test]
    async fn test_archived_account_rejects_markings() {
        let (ledger, service) = service();
        let account = ledger.seed_account("cust-1", "biz-7", SavingsSchedule::Fixed, Some(dec!(100)));
        ledger.seed_marking(&account.id, dec!(10), 1);

        assert_eq!(
            service.archive_account(&account.id).await.unwrap(),
            ArchiveOutcome::Archived
        );
        let err = service
            .record_marking(marking(&account.id, dec!(10), 2, None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Ledger(LedgerError::AccountArchived(_))));
    }

    #[tokio::test]
    async fn test_archive_without_markings_deletes() {
        let (ledger, service) = service();
        let account = ledger.seed_account("cust-1", "biz-7", SavingsSchedule::Fixed, Some(dec!(100)));

        assert_eq!(
            service.archive_account(&account.id).await.unwrap(),
            ArchiveOutcome::Deleted
        );
        assert!(service.get_account(&account.id).is_err());
    }

    #[tokio::test]
    async fn test_goal_edit_keeps_completion() {
        let (ledger, service) = service();
        let account = ledger.seed_account("cust-1", "biz-7", SavingsSchedule::Fixed, Some(dec!(100)));
        ledger.with_state(|state| {
            state.accounts[0].status = SavingsStatus::Completed;
        });

        let updated = service
            .update_goal_amount(&account.id, Some(dec!(500)))
            .await
            .unwrap();
        assert_eq!(updated.goal_amount, Some(dec!(500)));
        assert_eq!(service.get_account(&account.id).unwrap().status, SavingsStatus::Completed);

        assert!(service.update_goal_amount(&account.id, None).await.is_err());
    }

    #[tokio::test]
    async fn test_complete_open_plan() {
        let (ledger, service) = service();
        let open = ledger.seed_account("cust-1", "biz-7", SavingsSchedule::Open, None);
        let fixed = ledger.seed_account("cust-1", "biz-7", SavingsSchedule::Fixed, Some(dec!(100)));

        let completed = service.complete_open_plan(&open.id).await.unwrap();
        assert_eq!(completed.status, SavingsStatus::Completed);
        // Completing twice is a no-op.
        assert!(service.complete_open_plan(&open.id).await.is_ok());

        let err = service.complete_open_plan(&fixed.id).await.unwrap_err();
        assert!(matches!(err, Error::Ledger(LedgerError::NotOpenPlan(_))));
    }

    #[tokio::test]
    async fn test_missing_account_is_not_found() {
        let (_, service) = service();
        let err = service
            .record_marking(marking("missing", dec!(10), 1, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
