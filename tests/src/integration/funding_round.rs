//! # Funding Round Scenarios
//!
//! A complete round through the service: staffing, scoring, selection and
//! milestone disbursement down to project completion.

#[cfg(test)]
mod tests {
    use super::super::harness::*;
    use ledger_runtime::{LedgerCommand, LedgerQuery, LedgerResponse};
    use rf_03_project_registry::{Project, ProjectStatus, SelectionOutcome};
    use rf_04_milestone_tracker::{ApprovalOutcome, MilestoneStatus, SubmissionState};
    use shared_types::{Address, Amount};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    async fn selected_round() -> Harness {
        let harness = Harness::start().await.unwrap();
        harness.reference_pool().await.unwrap();
        let outcome = select(&harness).await;
        assert_eq!(outcome.selected, vec![P1, P3]);
        harness
    }

    async fn select(harness: &Harness) -> SelectionOutcome {
        let receipt = harness
            .exec(SUPER_ADMIN, LedgerCommand::SelectForFunding { research_area: AREA })
            .await
            .unwrap();
        match receipt.response {
            LedgerResponse::Selection(outcome) => outcome,
            other => panic!("Expected selection outcome, got {:?}", other),
        }
    }

    async fn project(harness: &Harness, owner: Address) -> Project {
        match harness.query(LedgerQuery::Project { owner }).await.unwrap() {
            LedgerResponse::Project(Some(project)) => project,
            other => panic!("Expected project, got {:?}", other),
        }
    }

    fn payment(response: &LedgerResponse) -> Amount {
        match response {
            LedgerResponse::Approval(ApprovalOutcome::Paid { payment, .. })
            | LedgerResponse::Approval(ApprovalOutcome::Completed { payment, .. }) => *payment,
            other => panic!("Expected paid approval, got {:?}", other),
        }
    }

    // =============================================================================
    // SCORING AND SELECTION
    // =============================================================================

    #[tokio::test]
    async fn test_reference_pool_scores() {
        let harness = Harness::start().await.unwrap();
        harness.reference_pool().await.unwrap();

        let scores = [
            project(&harness, P1).await.score,
            project(&harness, P2).await.score,
            project(&harness, P3).await.score,
        ];
        assert_eq!(scores, [19, 16, 17]);
        for owner in [P1, P2, P3] {
            assert_eq!(project(&harness, owner).await.status, ProjectStatus::Scored);
        }
    }

    #[tokio::test]
    async fn test_selection_funds_best_fitting_projects() {
        let harness = Harness::start().await.unwrap();
        harness.reference_pool().await.unwrap();

        let outcome = select(&harness).await;
        assert_eq!(outcome.selected, vec![P1, P3]);
        assert_eq!(outcome.deferred, vec![P2]);
        assert_eq!(outcome.committed_budget, 3900);
        assert_eq!(outcome.remaining_budget, 1100);

        assert_eq!(project(&harness, P1).await.status, ProjectStatus::Selected);
        assert_eq!(project(&harness, P2).await.status, ProjectStatus::Scored);
        assert_eq!(project(&harness, P3).await.status, ProjectStatus::Selected);

        // Every selected project has a disbursement track.
        for owner in [P1, P3] {
            let response = harness
                .query(LedgerQuery::MilestoneRecord { owner })
                .await
                .unwrap();
            let LedgerResponse::MilestoneRecord(record) = response else {
                panic!("Expected milestone record");
            };
            assert_eq!(record.milestone_count, AREA_MILESTONES);
            assert_eq!(record.state, SubmissionState::NoneRequested);
        }
        assert!(harness
            .query(LedgerQuery::MilestoneRecord { owner: P2 })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_rerun_selection_is_noop() {
        let harness = selected_round().await;
        let outcome = select(&harness).await;
        assert!(outcome.selected.is_empty());
        assert_eq!(outcome.deferred, vec![P2]);
        assert_eq!(outcome.remaining_budget, 1100);
    }

    #[tokio::test]
    async fn test_later_round_uses_remaining_budget() {
        let harness = selected_round().await;
        let p4 = Address::repeat_byte(0xa4);
        let ballots: Vec<_> = validators()
            .into_iter()
            .map(|v| (v, "11"))
            .collect();
        harness
            .register_and_score(p4, 1000, AREA, &ballots)
            .await
            .unwrap();

        let outcome = select(&harness).await;
        assert_eq!(outcome.selected, vec![p4]);
        assert_eq!(outcome.deferred, vec![P2]);
        assert_eq!(outcome.remaining_budget, 100);
    }

    // =============================================================================
    // MILESTONE DISBURSEMENT
    // =============================================================================

    #[tokio::test]
    async fn test_milestones_pay_out_full_budget() {
        let harness = selected_round().await;
        let approver = validators()[3];

        let mut paid = Vec::new();
        for _ in 0..AREA_MILESTONES {
            let receipt = harness.milestone(P1, approver, true).await.unwrap();
            paid.push(payment(&receipt.response));
        }
        assert_eq!(paid, vec![667, 667, 666]);

        let p1 = project(&harness, P1).await;
        assert_eq!(p1.status, ProjectStatus::Completed);
        assert_eq!(p1.funds_received, 2000);

        let response = harness
            .query(LedgerQuery::MilestoneDetails { owner: P1 })
            .await
            .unwrap();
        let LedgerResponse::MilestoneDetails(details) = response else {
            panic!("Expected milestone details");
        };
        assert_eq!(
            details.statuses,
            vec![
                MilestoneStatus::Approved,
                MilestoneStatus::Approved,
                MilestoneStatus::Final
            ]
        );
        assert_eq!(details.completion_dates.len(), 3);
        assert_eq!(
            harness
                .query(LedgerQuery::LastDisbursed { owner: P1 })
                .await
                .unwrap(),
            LedgerResponse::Count(3)
        );

        // Nothing left to request.
        assert!(harness
            .exec(P1, LedgerCommand::RequestMilestoneApproval)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_rejection_resets_request() {
        let harness = selected_round().await;
        let approver = validators()[0];

        let receipt = harness.milestone(P3, approver, false).await.unwrap();
        assert_eq!(
            receipt.response,
            LedgerResponse::Approval(ApprovalOutcome::Rejected { milestone_index: 0 })
        );
        let LedgerResponse::MilestoneRecord(record) = harness
            .query(LedgerQuery::MilestoneRecord { owner: P3 })
            .await
            .unwrap()
        else {
            panic!("Expected milestone record");
        };
        assert_eq!(record.rejections, 1);
        assert_eq!(record.state, SubmissionState::NoneRequested);
        assert_eq!(project(&harness, P3).await.funds_received, 0);

        // Resubmitting the same milestone and approving pays ceil(1900 / 3).
        let receipt = harness.milestone(P3, approver, true).await.unwrap();
        assert_eq!(payment(&receipt.response), 634);
    }

    #[tokio::test]
    async fn test_admin_awards_additional_funds() {
        let harness = selected_round().await;
        let receipt = harness
            .exec(
                ADMINS[0],
                LedgerCommand::AwardAdditionalFunds {
                    owner: P1,
                    amount: 250,
                },
            )
            .await
            .unwrap();
        assert_eq!(receipt.response, LedgerResponse::FundsTotal(250));

        let p1 = project(&harness, P1).await;
        assert_eq!(p1.additional_funds_received, 250);
        assert_eq!(p1.funds_received, 0);

        // Bonus funds do not change the milestone schedule.
        let receipt = harness.milestone(P1, validators()[1], true).await.unwrap();
        assert_eq!(payment(&receipt.response), 667);
    }
}
