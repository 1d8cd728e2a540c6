//! # Adversarial Scenarios
//!
//! Misuse from unprivileged or wrongly placed callers. Every rejected call
//! must leave the ledger exactly as it was.
//!
//! | Attack                       | Expected defence                          |
//! |------------------------------|-------------------------------------------|
//! | Double ballot                | "already scored", score unchanged         |
//! | Self-scoring validator       | rejected before any write                 |
//! | Cross-area ballot            | research area mismatch                    |
//! | Under-verified validator     | not verified                              |
//! | Direct fund credit           | only the milestone authority may credit   |
//! | Over-budget credit           | invariant violation, funds unchanged      |
//! | Request on a closed project  | invalid state, nothing paid               |
//! | Request replay               | replay guard refuses the second submit    |
//! | Authority hijack             | owner only                                |

#[cfg(test)]
mod tests {
    use super::super::harness::*;
    use futures::future::join_all;
    use ledger_runtime::{
        FundingApi, LedgerCommand, LedgerError, LedgerQuery, LedgerRequest, LedgerResponse,
    };
    use rand::Rng;
    use rf_03_project_registry::{Project, ProjectStatus};
    use shared_bus::ReplayError;
    use shared_types::{Address, ClassifiedError, ErrorKind};

    async fn project(harness: &Harness, owner: Address) -> Option<Project> {
        match harness.query(LedgerQuery::Project { owner }).await.unwrap() {
            LedgerResponse::Project(project) => project,
            other => panic!("Expected project, got {:?}", other),
        }
    }

    async fn selected_round() -> Harness {
        let harness = Harness::start().await.unwrap();
        harness.reference_pool().await.unwrap();
        harness
            .exec(SUPER_ADMIN, LedgerCommand::SelectForFunding { research_area: AREA })
            .await
            .unwrap();
        harness
    }

    // =============================================================================
    // BALLOT ABUSE
    // =============================================================================

    #[tokio::test]
    async fn test_double_ballot_rejected() {
        let harness = Harness::start().await.unwrap();
        harness.staff().await.unwrap();
        let v = validators()[0];
        harness
            .register_and_score(P1, 2000, AREA, &[(v, "101")])
            .await
            .unwrap();

        let err = harness
            .exec(
                v,
                LedgerCommand::CastBallot {
                    owner: P1,
                    choices: "111".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "The validator has already scored this project");

        let p1 = project(&harness, P1).await.unwrap();
        assert_eq!(p1.score, 2);
        assert_eq!(p1.total_ballots, 1);
    }

    #[tokio::test]
    async fn test_validator_cannot_score_own_project() {
        let harness = Harness::start().await.unwrap();
        harness.staff().await.unwrap();
        let v = validators()[0];

        let err = harness
            .register_and_score(v, 500, AREA, &[(v, "1")])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Project owner cannot score own project");
        assert_eq!(project(&harness, v).await.unwrap().total_ballots, 0);
    }

    #[tokio::test]
    async fn test_cross_area_ballot_rejected() {
        let harness = Harness::start().await.unwrap();
        harness.staff().await.unwrap();
        let outsiders = validators_from(0x31);
        harness.open_area(3, 2, 1000, &outsiders).await.unwrap();
        harness.register_and_score(P1, 2000, AREA, &[]).await.unwrap();

        let err = harness
            .exec(
                outsiders[0],
                LedgerCommand::CastBallot {
                    owner: P1,
                    choices: "1".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(err.to_string().contains("does not match project research area"));
    }

    #[tokio::test]
    async fn test_under_verified_validator_cannot_ballot() {
        let harness = Harness::start().await.unwrap();
        harness.staff().await.unwrap();
        harness.register_and_score(P1, 2000, AREA, &[]).await.unwrap();

        let v = Address::repeat_byte(0x19);
        harness
            .exec(v, LedgerCommand::RegisterValidator { research_area: AREA })
            .await
            .unwrap();
        for admin in [SUPER_ADMIN, ADMINS[0]] {
            harness
                .exec(admin, LedgerCommand::CastVerificationVote { validator: v, vote: 1 })
                .await
                .unwrap();
        }

        let err = harness
            .exec(
                v,
                LedgerCommand::CastBallot {
                    owner: P1,
                    choices: "1".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Validator not verified"));
    }

    #[tokio::test]
    async fn test_random_ballots_score_their_yes_answers() {
        let harness = Harness::start().await.unwrap();
        harness.staff().await.unwrap();
        harness.register_and_score(P1, 2000, AREA, &[]).await.unwrap();

        let mut rng = rand::thread_rng();
        let length = rng.gen_range(1..=64);
        let mut expected = 0u64;
        for v in validators() {
            let choices: String = (0..length)
                .map(|_| if rng.gen_bool(0.5) { '1' } else { '0' })
                .collect();
            expected += choices.chars().filter(|c| *c == '1').count() as u64;
            harness
                .exec(v, LedgerCommand::CastBallot { owner: P1, choices })
                .await
                .unwrap();
        }
        assert_eq!(project(&harness, P1).await.unwrap().score, expected);
    }

    // =============================================================================
    // FUND ACCOUNTING ABUSE
    // =============================================================================

    #[tokio::test]
    async fn test_only_authority_credits_funds() {
        let harness = selected_round().await;

        for caller in [SUPER_ADMIN, ADMINS[0], validators()[0], P1] {
            let err = harness
                .exec(caller, LedgerCommand::CreditFunds { owner: P1, amount: 100 })
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Only Milestone contract can update funds");
        }
        assert_eq!(project(&harness, P1).await.unwrap().funds_received, 0);

        let receipt = harness
            .exec(TRACKER, LedgerCommand::CreditFunds { owner: P1, amount: 100 })
            .await
            .unwrap();
        assert_eq!(receipt.response, LedgerResponse::FundsTotal(100));
    }

    #[tokio::test]
    async fn test_over_budget_credit_rolled_back() {
        let harness = selected_round().await;
        let err = harness
            .exec(TRACKER, LedgerCommand::CreditFunds { owner: P1, amount: 2001 })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
        assert!(err.is_fatal());
        assert_eq!(project(&harness, P1).await.unwrap().funds_received, 0);
    }

    #[tokio::test]
    async fn test_completed_project_refuses_further_requests() {
        let harness = selected_round().await;
        for _ in 0..AREA_MILESTONES {
            harness.milestone(P3, validators()[1], true).await.unwrap();
        }
        assert_eq!(
            project(&harness, P3).await.unwrap().status,
            ProjectStatus::Completed
        );

        let err = harness
            .exec(P3, LedgerCommand::RequestMilestoneApproval)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        let err = harness
            .exec(validators()[1], LedgerCommand::DecideMilestone { owner: P3, approve: true })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(project(&harness, P3).await.unwrap().funds_received, 1900);
    }

    #[tokio::test]
    async fn test_authority_hijack_rejected() {
        let harness = selected_round().await;
        let attacker = Address::repeat_byte(0x66);

        let err = harness
            .exec(
                ADMINS[0],
                LedgerCommand::SetMilestoneAuthority { authority: attacker },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Only owner can set milestone contract address");
        assert_eq!(
            harness.query(LedgerQuery::MilestoneAuthority).await.unwrap(),
            LedgerResponse::Authority(Some(TRACKER))
        );

        let err = harness
            .exec(
                SUPER_ADMIN,
                LedgerCommand::SetMilestoneAuthority {
                    authority: Address::ZERO,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_owner_cannot_approve_own_milestone() {
        let harness = selected_round().await;
        harness
            .exec(P1, LedgerCommand::RequestMilestoneApproval)
            .await
            .unwrap();

        let err = harness
            .exec(P1, LedgerCommand::DecideMilestone { owner: P1, approve: true })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Project owner cannot approve own milestone");

        let err = harness
            .exec(
                Address::repeat_byte(0x77),
                LedgerCommand::DecideMilestone { owner: P1, approve: true },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    // =============================================================================
    // REPLAY AND ORDERING
    // =============================================================================

    #[tokio::test]
    async fn test_replayed_request_refused() {
        let harness = Harness::start().await.unwrap();
        let request = LedgerRequest::new(SUPER_ADMIN, LedgerCommand::AddAdmin { admin: ADMINS[0] });

        harness.handle.submit(request.clone()).await.unwrap();
        let err = harness.handle.submit(request).await.unwrap_err();
        assert!(matches!(err, LedgerError::Replay(ReplayError::Replayed { .. })));
        assert_eq!(
            harness.query(LedgerQuery::Admins).await.unwrap(),
            LedgerResponse::Addresses(vec![SUPER_ADMIN, ADMINS[0]])
        );
    }

    #[tokio::test]
    async fn test_concurrent_registrations_totally_ordered() {
        let harness = Harness::start().await.unwrap();
        harness.staff().await.unwrap();

        let owners: Vec<_> = (0x40..0x60).map(Address::repeat_byte).collect();
        let submissions = owners.iter().map(|&owner| {
            let handle = harness.handle.clone();
            async move {
                handle
                    .execute(
                        owner,
                        LedgerCommand::RegisterProject {
                            budget_estimate: 10,
                            research_area: AREA,
                        },
                    )
                    .await
            }
        });
        let receipts: Vec<_> = join_all(submissions)
            .await
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        let mut sequences: Vec<u64> = receipts
            .iter()
            .flat_map(|r| r.events.iter().map(|e| e.sequence))
            .collect();
        sequences.sort_unstable();
        sequences.dedup();
        assert_eq!(sequences.len(), owners.len());

        let response = harness
            .query(LedgerQuery::ProjectsInArea { research_area: AREA })
            .await
            .unwrap();
        let LedgerResponse::Projects(projects) = response else {
            panic!("Expected projects");
        };
        assert_eq!(projects.len(), owners.len());
    }
}
