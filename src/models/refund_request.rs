//! Refund request model.
//!
//! This module defines [`RefundRequest`] together with the statuses it moves
//! through and the reviewer actions that move it.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a refund request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    /// Waiting for a refund expert to check the cancellation.
    PendingExpertReview,
    /// Waiting for finance to approve the amount.
    PendingFinancialReview,
    /// Approved and waiting to be paid out.
    PendingPayment,
    /// Paid out. Terminal.
    Completed,
    /// Turned down by a reviewer. Terminal.
    Rejected,
}

impl RefundStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [RefundStatus; 5] = [
        RefundStatus::PendingExpertReview,
        RefundStatus::PendingFinancialReview,
        RefundStatus::PendingPayment,
        RefundStatus::Completed,
        RefundStatus::Rejected,
    ];

    /// Returns true once no further action is permitted.
    pub fn is_terminal(self) -> bool {
        matches!(self, RefundStatus::Completed | RefundStatus::Rejected)
    }

    /// Position along the approval path. Rejection sorts after everything.
    pub fn rank(self) -> u8 {
        match self {
            RefundStatus::PendingExpertReview => 0,
            RefundStatus::PendingFinancialReview => 1,
            RefundStatus::PendingPayment => 2,
            RefundStatus::Completed => 3,
            RefundStatus::Rejected => 4,
        }
    }

    /// Returns the wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            RefundStatus::PendingExpertReview => "PENDING_EXPERT_REVIEW",
            RefundStatus::PendingFinancialReview => "PENDING_FINANCIAL_REVIEW",
            RefundStatus::PendingPayment => "PENDING_PAYMENT",
            RefundStatus::Completed => "COMPLETED",
            RefundStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reviewer action on a refund request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundAction {
    /// Refund expert signs off on the cancellation.
    ExpertApprove,
    /// Finance signs off on the amount.
    FinancialApprove,
    /// The refund has been paid out.
    ProcessPayment,
    /// Turn the refund down. Requires a reason.
    Reject,
}

impl RefundAction {
    /// All actions.
    pub const ALL: [RefundAction; 4] = [
        RefundAction::ExpertApprove,
        RefundAction::FinancialApprove,
        RefundAction::ProcessPayment,
        RefundAction::Reject,
    ];

    /// Returns the wire name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            RefundAction::ExpertApprove => "expert_approve",
            RefundAction::FinancialApprove => "financial_approve",
            RefundAction::ProcessPayment => "process_payment",
            RefundAction::Reject => "reject",
        }
    }
}

impl fmt::Display for RefundAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to refund a cancelled booking.
///
/// The monetary fields are fixed when the request is created. Transitions
/// only touch `status`, the audit field pair for that step, and `version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The booking being cancelled.
    pub booking_id: String,
    /// The policy that priced the penalty.
    pub policy_id: String,
    /// When the cancellation was requested.
    pub request_date: DateTime<Utc>,
    /// The amount originally paid.
    pub original_amount: Decimal,
    /// The penalty percentage selected at creation.
    pub penalty_percentage: Decimal,
    /// The amount withheld.
    pub penalty_amount: Decimal,
    /// The amount to be paid back.
    pub refund_amount: Decimal,
    /// Current lifecycle status.
    pub status: RefundStatus,
    /// Who approved the expert review.
    #[serde(default)]
    pub expert_reviewer_name: Option<String>,
    /// When the expert review was approved.
    #[serde(default)]
    pub expert_review_date: Option<DateTime<Utc>>,
    /// Who approved the financial review.
    #[serde(default)]
    pub financial_reviewer_name: Option<String>,
    /// When the financial review was approved.
    #[serde(default)]
    pub financial_review_date: Option<DateTime<Utc>>,
    /// Who recorded the payment.
    #[serde(default)]
    pub payment_processor_name: Option<String>,
    /// When the payment was recorded.
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,
    /// Who rejected the refund.
    #[serde(default)]
    pub rejecter_name: Option<String>,
    /// When the refund was rejected.
    #[serde(default)]
    pub rejection_date: Option<DateTime<Utc>>,
    /// Why the refund was rejected.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Incremented on every persisted change.
    pub version: u64,
}

impl RefundRequest {
    /// Returns true once the request is completed or rejected.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&RefundStatus::PendingFinancialReview).unwrap();
        assert_eq!(json, "\"PENDING_FINANCIAL_REVIEW\"");
    }

    #[test]
    fn test_status_display_matches_wire_name() {
        for status in RefundStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }

    #[test]
    fn test_action_wire_names() {
        let names: Vec<String> = RefundAction::ALL
            .iter()
            .map(|a| serde_json::to_string(a).unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "\"expert_approve\"",
                "\"financial_approve\"",
                "\"process_payment\"",
                "\"reject\""
            ]
        );
    }

    #[test]
    fn test_only_completed_and_rejected_are_terminal() {
        let terminal: Vec<RefundStatus> = RefundStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![RefundStatus::Completed, RefundStatus::Rejected]);
    }

    #[test]
    fn test_rank_follows_lifecycle_order() {
        let ranks: Vec<u8> = RefundStatus::ALL.iter().map(|s| s.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
    }
}
