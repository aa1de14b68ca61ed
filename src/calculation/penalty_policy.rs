//! Penalty policy evaluation.
//!
//! This module selects the penalty rule that applies to a cancellation,
//! given the hours remaining before departure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::RefundPolicy;

/// The outcome of evaluating a refund policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyEvaluation {
    /// Share of the original amount withheld, between 0 and 100.
    pub penalty_percentage: Decimal,
    /// Threshold of the rule that was selected.
    pub selected_threshold: u32,
}

/// Evaluates a refund policy for the given hours before departure.
///
/// Selects the rule with the largest threshold that does not exceed
/// `hours_before_departure`. When the departure has already passed the
/// zero-threshold rule applies.
///
/// # Arguments
///
/// * `policy` - The refund policy to evaluate
/// * `hours_before_departure` - Hours remaining, possibly fractional or negative
///
/// # Returns
///
/// Returns the selected penalty, or [`EngineError::PolicyConfiguration`] if
/// no rule covers the input and the policy has no zero-threshold rule.
///
/// # Examples
///
/// ```
/// use refund_engine::calculation::evaluate_policy;
/// use refund_engine::models::{PenaltyRule, RefundPolicy};
/// use rust_decimal::Decimal;
///
/// let rule = |h: u32, p: i64| PenaltyRule {
///     hours_before_departure: h,
///     penalty_percentage: Decimal::from(p),
/// };
/// let policy = RefundPolicy::new("standard", "Standard", vec![rule(0, 100), rule(24, 50), rule(72, 10)]).unwrap();
///
/// let evaluation = evaluate_policy(&policy, Decimal::from(50)).unwrap();
/// assert_eq!(evaluation.selected_threshold, 24);
/// assert_eq!(evaluation.penalty_percentage, Decimal::from(50));
/// ```
pub fn evaluate_policy(
    policy: &RefundPolicy,
    hours_before_departure: Decimal,
) -> EngineResult<PenaltyEvaluation> {
    let rule = policy
        .rules()
        .iter()
        .find(|r| Decimal::from(r.hours_before_departure) <= hours_before_departure)
        .or_else(|| policy.floor_rule())
        .ok_or_else(|| EngineError::PolicyConfiguration {
            policy_id: policy.id().to_string(),
            message: format!(
                "no rule covers {} hours before departure and there is no zero-hour rule",
                hours_before_departure
            ),
        })?;

    Ok(PenaltyEvaluation {
        penalty_percentage: rule.penalty_percentage,
        selected_threshold: rule.hours_before_departure,
    })
}
