//! Property tests for policy evaluation and the refund state machine.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use refund_engine::calculation::{calculate_refund_amounts, evaluate_policy};
use refund_engine::error::EngineError;
use refund_engine::lifecycle::{apply_transition, next_status};
use refund_engine::models::{
    MAX_PENALTY_PERCENTAGE, PenaltyRule, RefundAction, RefundPolicy, RefundRequest, RefundStatus,
};

// =============================================================================
// Strategies
// =============================================================================

/// Percentages with up to one decimal place, 0.0 to 100.0.
fn arb_percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=1000).prop_map(|tenths| Decimal::new(tenths, 1))
}

/// Policies with a zero-hour rule and up to seven further thresholds.
fn arb_policy() -> impl Strategy<Value = RefundPolicy> {
    (
        arb_percentage(),
        prop::collection::btree_map(1u32..500, arb_percentage(), 0..8),
    )
        .prop_map(|(floor, rest): (Decimal, BTreeMap<u32, Decimal>)| {
            let mut rules = vec![PenaltyRule {
                hours_before_departure: 0,
                penalty_percentage: floor,
            }];
            rules.extend(rest.into_iter().map(|(h, p)| PenaltyRule {
                hours_before_departure: h,
                penalty_percentage: p,
            }));
            RefundPolicy::new("generated", "Generated", rules).unwrap()
        })
}

/// Hours before departure in quarter-hour steps, including past departures.
fn arb_hours() -> impl Strategy<Value = Decimal> {
    (-4000i64..4000).prop_map(|quarters| Decimal::new(quarters * 25, 2))
}

fn arb_status() -> impl Strategy<Value = RefundStatus> {
    prop::sample::select(RefundStatus::ALL.to_vec())
}

fn arb_action() -> impl Strategy<Value = RefundAction> {
    prop::sample::select(RefundAction::ALL.to_vec())
}

fn request_in(status: RefundStatus) -> RefundRequest {
    RefundRequest {
        id: Uuid::new_v4(),
        booking_id: "bk_prop".to_string(),
        policy_id: "generated".to_string(),
        request_date: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
        original_amount: Decimal::from(1000),
        penalty_percentage: Decimal::from(10),
        penalty_amount: Decimal::from(100),
        refund_amount: Decimal::from(900),
        status,
        expert_reviewer_name: None,
        expert_review_date: None,
        financial_reviewer_name: None,
        financial_review_date: None,
        payment_processor_name: None,
        payment_date: None,
        rejecter_name: None,
        rejection_date: None,
        rejection_reason: None,
        version: 0,
    }
}

proptest! {
    // =========================================================================
    // Policy evaluation
    // =========================================================================

    #[test]
    fn penalty_always_within_bounds(policy in arb_policy(), hours in arb_hours()) {
        let evaluation = evaluate_policy(&policy, hours).unwrap();
        prop_assert!(evaluation.penalty_percentage >= Decimal::ZERO);
        prop_assert!(evaluation.penalty_percentage <= MAX_PENALTY_PERCENTAGE);
    }

    #[test]
    fn hours_past_largest_threshold_use_first_rule(policy in arb_policy(), extra in 0u32..10_000) {
        let top = policy.rules()[0];
        let hours = Decimal::from(top.hours_before_departure) + Decimal::from(extra);

        let evaluation = evaluate_policy(&policy, hours).unwrap();
        prop_assert_eq!(evaluation.selected_threshold, top.hours_before_departure);
        prop_assert_eq!(evaluation.penalty_percentage, top.penalty_percentage);
    }

    #[test]
    fn evaluation_is_idempotent(policy in arb_policy(), hours in arb_hours()) {
        prop_assert_eq!(
            evaluate_policy(&policy, hours).unwrap(),
            evaluate_policy(&policy, hours).unwrap()
        );
    }

    #[test]
    fn selected_rule_is_largest_threshold_not_above_hours(
        policy in arb_policy(),
        hours in arb_hours(),
    ) {
        let evaluation = evaluate_policy(&policy, hours).unwrap();
        let selected = Decimal::from(evaluation.selected_threshold);
        prop_assert!(selected <= hours.max(Decimal::ZERO));
        for rule in policy.rules() {
            let threshold = Decimal::from(rule.hours_before_departure);
            prop_assert!(!(threshold > selected && threshold <= hours));
        }
    }

    #[test]
    fn refund_plus_penalty_equals_original(
        amount in 0i64..1_000_000_000_000,
        percentage in arb_percentage(),
    ) {
        let amounts = calculate_refund_amounts(Decimal::from(amount), percentage).unwrap();
        prop_assert_eq!(amounts.penalty_amount + amounts.refund_amount, Decimal::from(amount));
        prop_assert!(amounts.refund_amount >= Decimal::ZERO);
    }

    // =========================================================================
    // State machine
    // =========================================================================

    #[test]
    fn status_never_moves_backward(actions in prop::collection::vec(arb_action(), 0..12)) {
        let mut request = request_in(RefundStatus::PendingExpertReview);
        let at = Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap();

        for action in actions {
            let before = request.status;
            match apply_transition(&request, action, "reviewer", Some("checked"), at) {
                Ok(updated) => {
                    prop_assert!(
                        updated.status.rank() > before.rank()
                            || updated.status == RefundStatus::Rejected
                    );
                    prop_assert_eq!(updated.version, request.version + 1);
                    request = updated;
                }
                Err(_) => prop_assert_eq!(next_status(before, action), None),
            }
        }
    }

    #[test]
    fn reject_without_reason_always_fails(
        status in arb_status(),
        reason in prop::option::of("[ \t]{0,4}"),
    ) {
        let at = Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap();
        let result = apply_transition(
            &request_in(status),
            RefundAction::Reject,
            "reviewer",
            reason.as_deref(),
            at,
        );
        let is_missing_reason = matches!(result, Err(EngineError::MissingReason));
        prop_assert!(is_missing_reason, "expected MissingReason, got {:?}", result);
    }

    #[test]
    fn terminal_requests_accept_no_action(
        terminal in prop::sample::select(vec![RefundStatus::Completed, RefundStatus::Rejected]),
        action in arb_action(),
        actor in prop::sample::select(vec!["", "  ", "reviewer"]),
    ) {
        let at = Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap();
        let result = apply_transition(&request_in(terminal), action, actor, Some("late"), at);
        let is_terminal_error =
            matches!(&result, Err(EngineError::TerminalState { status }) if *status == terminal);
        prop_assert!(is_terminal_error, "expected TerminalState, got {:?}", result);
    }
}
