//! Refund quote models for the Refund Engine.
//!
//! This module contains the [`RefundQuote`] type and its audit structures.
//! A quote captures the full monetary breakdown of a cancellation together
//! with a trace of every rule decision that produced it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a pricing decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a quote.
///
/// # Example
///
/// ```
/// use refund_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of pricing steps.
    pub steps: Vec<AuditStep>,
    /// The total pricing duration in microseconds.
    pub duration_us: u64,
}

/// The priced outcome of cancelling a booking under a policy.
///
/// Quotes are previews and are never persisted. Creating a refund request
/// prices it the same way and copies the amounts onto the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundQuote {
    /// The booking being priced.
    pub booking_id: String,
    /// The policy used.
    pub policy_id: String,
    /// When the cancellation would take effect.
    pub quoted_at: DateTime<Utc>,
    /// Hours remaining before departure at `quoted_at`. Negative after departure.
    pub hours_before_departure: Decimal,
    /// Threshold of the rule that was selected.
    pub selected_threshold: u32,
    /// Share of the original amount withheld.
    pub penalty_percentage: Decimal,
    /// The amount originally paid.
    pub original_amount: Decimal,
    /// The amount withheld.
    pub penalty_amount: Decimal,
    /// The amount to be paid back.
    pub refund_amount: Decimal,
    /// Currency of the amounts.
    pub currency: String,
    /// Trace of the pricing decisions.
    pub audit_trace: AuditTrace,
}
