//! Refund quote assembly.
//!
//! Runs time-to-departure, policy evaluation, and amount calculation in
//! sequence and records an audit step for each.

use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, Booking, RefundPolicy, RefundQuote};

use super::{calculate_refund_amounts, evaluate_policy, hours_before_departure};

/// Prices the cancellation of `booking` under `policy` at time `at`.
///
/// # Examples
///
/// ```
/// use refund_engine::calculation::build_quote;
/// use refund_engine::models::{Booking, BookingSource, PenaltyRule, RefundPolicy};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let rule = |h: u32, p: i64| PenaltyRule {
///     hours_before_departure: h,
///     penalty_percentage: Decimal::from(p),
/// };
/// let policy = RefundPolicy::new("standard", "Standard", vec![rule(0, 100), rule(24, 50), rule(72, 10)]).unwrap();
/// let booking = Booking {
///     id: "bk_001".to_string(),
///     amount: Decimal::from(10_000_000),
///     currency: "IRR".to_string(),
///     departure_time: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
///     source: BookingSource::Direct { pnr: "ABC123".to_string() },
/// };
///
/// let at = Utc.with_ymd_and_hms(2026, 2, 25, 4, 0, 0).unwrap(); // 100h before
/// let quote = build_quote(&booking, &policy, at).unwrap();
/// assert_eq!(quote.selected_threshold, 72);
/// assert_eq!(quote.refund_amount, Decimal::from(9_000_000));
/// assert_eq!(quote.audit_trace.steps.len(), 3);
/// ```
pub fn build_quote(
    booking: &Booking,
    policy: &RefundPolicy,
    at: DateTime<Utc>,
) -> EngineResult<RefundQuote> {
    let start_time = Instant::now();
    booking.validate()?;

    let hours = hours_before_departure(booking.departure_time, at);
    let time_step = AuditStep {
        step_number: 1,
        rule_id: "hours_before_departure".to_string(),
        rule_name: "Time Before Departure".to_string(),
        input: serde_json::json!({
            "departure_time": booking.departure_time.to_rfc3339(),
            "requested_at": at.to_rfc3339(),
        }),
        output: serde_json::json!({
            "hours_before_departure": hours.to_string(),
        }),
        reasoning: format!("{} hours remain before departure", hours),
    };

    let evaluation = evaluate_policy(policy, hours)?;
    let policy_step = AuditStep {
        step_number: 2,
        rule_id: "penalty_policy".to_string(),
        rule_name: "Penalty Policy Rule Selection".to_string(),
        input: serde_json::json!({
            "policy_id": policy.id(),
            "hours_before_departure": hours.to_string(),
            "thresholds": policy
                .rules()
                .iter()
                .map(|r| r.hours_before_departure)
                .collect::<Vec<_>>(),
        }),
        output: serde_json::json!({
            "selected_threshold": evaluation.selected_threshold,
            "penalty_percentage": evaluation.penalty_percentage.normalize().to_string(),
        }),
        reasoning: format!(
            "{} hours ≥ {}h threshold: {}% penalty",
            hours,
            evaluation.selected_threshold,
            evaluation.penalty_percentage.normalize()
        ),
    };

    let amounts = calculate_refund_amounts(booking.amount, evaluation.penalty_percentage)?;
    let amount_step = AuditStep {
        step_number: 3,
        rule_id: "refund_amount".to_string(),
        rule_name: "Refund Amount".to_string(),
        input: serde_json::json!({
            "original_amount": amounts.original_amount.normalize().to_string(),
            "penalty_percentage": evaluation.penalty_percentage.normalize().to_string(),
        }),
        output: serde_json::json!({
            "penalty_amount": amounts.penalty_amount.normalize().to_string(),
            "refund_amount": amounts.refund_amount.normalize().to_string(),
        }),
        reasoning: format!(
            "{} × {}% = {} withheld, {} refunded",
            amounts.original_amount.normalize(),
            evaluation.penalty_percentage.normalize(),
            amounts.penalty_amount.normalize(),
            amounts.refund_amount.normalize()
        ),
    };

    Ok(RefundQuote {
        booking_id: booking.id.clone(),
        policy_id: policy.id().to_string(),
        quoted_at: at,
        hours_before_departure: hours,
        selected_threshold: evaluation.selected_threshold,
        penalty_percentage: evaluation.penalty_percentage,
        original_amount: amounts.original_amount,
        penalty_amount: amounts.penalty_amount,
        refund_amount: amounts.refund_amount,
        currency: booking.currency.clone(),
        audit_trace: AuditTrace {
            steps: vec![time_step, policy_step, amount_step],
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}
