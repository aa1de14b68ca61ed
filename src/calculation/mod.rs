//! Pricing logic for the Refund Engine.
//!
//! This module contains the calculation functions for pricing a cancellation:
//! hours remaining before departure, penalty rule selection from a refund
//! policy, the penalty/refund amount split, and quote assembly with an
//! audit trace.

mod hours_before_departure;
mod penalty_policy;
mod quote;
mod refund_amount;

pub use hours_before_departure::hours_before_departure;
pub use penalty_policy::{PenaltyEvaluation, evaluate_policy};
pub use quote::build_quote;
pub use refund_amount::{RefundAmounts, calculate_refund_amounts};
