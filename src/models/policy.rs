//! Refund policy model.
//!
//! A refund policy maps the time remaining before departure to the share of
//! the fare withheld when a booking is cancelled.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The largest penalty percentage a rule may carry.
pub const MAX_PENALTY_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

/// A single penalty rule within a refund policy.
///
/// The rule applies when at least `hours_before_departure` hours remain
/// before the flight leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyRule {
    /// Minimum hours before departure for this rule to apply.
    pub hours_before_departure: u32,
    /// Share of the original amount withheld, between 0 and 100.
    pub penalty_percentage: Decimal,
}

/// An immutable, validated refund policy.
///
/// Rules are kept sorted by descending threshold so that evaluation can take
/// the first rule whose threshold does not exceed the remaining hours.
///
/// # Example
///
/// ```
/// use refund_engine::models::{PenaltyRule, RefundPolicy};
/// use rust_decimal::Decimal;
///
/// let policy = RefundPolicy::new(
///     "standard",
///     "Standard economy",
///     vec![
///         PenaltyRule { hours_before_departure: 0, penalty_percentage: Decimal::from(100) },
///         PenaltyRule { hours_before_departure: 72, penalty_percentage: Decimal::from(10) },
///         PenaltyRule { hours_before_departure: 24, penalty_percentage: Decimal::from(50) },
///     ],
/// )
/// .unwrap();
///
/// let thresholds: Vec<u32> = policy.rules().iter().map(|r| r.hours_before_departure).collect();
/// assert_eq!(thresholds, vec![72, 24, 0]);
/// assert!(policy.has_floor());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefundPolicy {
    id: String,
    name: String,
    rules: Vec<PenaltyRule>,
}

impl RefundPolicy {
    /// Builds a policy, validating and sorting its rules.
    ///
    /// Fails with [`EngineError::PolicyConfiguration`] when the rule list is
    /// empty, a percentage falls outside 0..=100, or two rules share a
    /// threshold.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rules: Vec<PenaltyRule>,
    ) -> EngineResult<Self> {
        let id = id.into();
        let misconfigured = |message: String| EngineError::PolicyConfiguration {
            policy_id: id.clone(),
            message,
        };

        if rules.is_empty() {
            return Err(misconfigured("policy has no rules".to_string()));
        }

        if let Some(rule) = rules.iter().find(|r| {
            r.penalty_percentage < Decimal::ZERO || r.penalty_percentage > MAX_PENALTY_PERCENTAGE
        }) {
            return Err(misconfigured(format!(
                "penalty {}% at {}h is outside 0..=100",
                rule.penalty_percentage, rule.hours_before_departure
            )));
        }

        let mut sorted = rules;
        sorted.sort_by(|a, b| b.hours_before_departure.cmp(&a.hours_before_departure));

        if let Some(pair) = sorted
            .windows(2)
            .find(|w| w[0].hours_before_departure == w[1].hours_before_departure)
        {
            return Err(misconfigured(format!(
                "threshold {}h appears more than once",
                pair[0].hours_before_departure
            )));
        }

        Ok(Self {
            id,
            name: name.into(),
            rules: sorted,
        })
    }

    /// Returns the policy identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable policy name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rules, sorted by descending threshold.
    pub fn rules(&self) -> &[PenaltyRule] {
        &self.rules
    }

    /// Returns the zero-threshold rule, if the policy defines one.
    pub fn floor_rule(&self) -> Option<&PenaltyRule> {
        self.rules.last().filter(|r| r.hours_before_departure == 0)
    }

    /// Returns true if the policy has a zero-threshold catch-all rule.
    pub fn has_floor(&self) -> bool {
        self.floor_rule().is_some()
    }
}
