//! Refund approval state machine.
//!
//! ```text
//! PENDING_EXPERT_REVIEW --expert_approve--> PENDING_FINANCIAL_REVIEW
//! PENDING_FINANCIAL_REVIEW --financial_approve--> PENDING_PAYMENT
//! PENDING_PAYMENT --process_payment--> COMPLETED
//! any non-terminal --reject--> REJECTED
//! ```

use chrono::{DateTime, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::{RefundAction, RefundRequest, RefundStatus};

/// Returns the status `action` leads to from `status`, if it is legal.
pub fn next_status(status: RefundStatus, action: RefundAction) -> Option<RefundStatus> {
    match (status, action) {
        (RefundStatus::PendingExpertReview, RefundAction::ExpertApprove) => {
            Some(RefundStatus::PendingFinancialReview)
        }
        (RefundStatus::PendingFinancialReview, RefundAction::FinancialApprove) => {
            Some(RefundStatus::PendingPayment)
        }
        (RefundStatus::PendingPayment, RefundAction::ProcessPayment) => {
            Some(RefundStatus::Completed)
        }
        (s, RefundAction::Reject) if !s.is_terminal() => Some(RefundStatus::Rejected),
        _ => None,
    }
}

/// Applies a reviewer action to a refund request.
///
/// Returns the updated request and leaves `request` untouched, so a failed
/// transition never produces a partially updated record. The returned
/// request carries `version + 1`.
///
/// Checks run in a fixed order. A reject with a blank reason fails with
/// [`EngineError::MissingReason`] in any state. Otherwise a completed or
/// rejected request fails with [`EngineError::TerminalState`], whoever acts.
/// Then a blank actor fails with [`EngineError::MissingActor`], and an action
/// that does not fit the current status fails with
/// [`EngineError::InvalidTransition`].
///
/// # Examples
///
/// ```
/// use refund_engine::lifecycle::apply_transition;
/// use refund_engine::models::{RefundAction, RefundRequest, RefundStatus};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let request = RefundRequest {
///     id: Uuid::new_v4(),
///     booking_id: "bk_001".to_string(),
///     policy_id: "standard".to_string(),
///     request_date: Utc::now(),
///     original_amount: Decimal::from(100),
///     penalty_percentage: Decimal::from(50),
///     penalty_amount: Decimal::from(50),
///     refund_amount: Decimal::from(50),
///     status: RefundStatus::PendingExpertReview,
///     expert_reviewer_name: None,
///     expert_review_date: None,
///     financial_reviewer_name: None,
///     financial_review_date: None,
///     payment_processor_name: None,
///     payment_date: None,
///     rejecter_name: None,
///     rejection_date: None,
///     rejection_reason: None,
///     version: 0,
/// };
///
/// let approved = apply_transition(&request, RefundAction::ExpertApprove, "sara", None, Utc::now()).unwrap();
/// assert_eq!(approved.status, RefundStatus::PendingFinancialReview);
/// assert_eq!(approved.expert_reviewer_name.as_deref(), Some("sara"));
///
/// let err = apply_transition(&request, RefundAction::ProcessPayment, "sara", None, Utc::now());
/// assert!(err.is_err());
/// ```
pub fn apply_transition(
    request: &RefundRequest,
    action: RefundAction,
    actor: &str,
    reason: Option<&str>,
    at: DateTime<Utc>,
) -> EngineResult<RefundRequest> {
    let reason = reason.map(str::trim).filter(|r| !r.is_empty());
    if action == RefundAction::Reject && reason.is_none() {
        return Err(EngineError::MissingReason);
    }

    if request.status.is_terminal() {
        return Err(EngineError::TerminalState {
            status: request.status,
        });
    }

    let actor = actor.trim();
    if actor.is_empty() {
        return Err(EngineError::MissingActor);
    }

    let next = next_status(request.status, action).ok_or(EngineError::InvalidTransition {
        status: request.status,
        action,
    })?;

    let mut updated = request.clone();
    updated.status = next;
    updated.version += 1;

    let actor = Some(actor.to_string());
    match action {
        RefundAction::ExpertApprove => {
            updated.expert_reviewer_name = actor;
            updated.expert_review_date = Some(at);
        }
        RefundAction::FinancialApprove => {
            updated.financial_reviewer_name = actor;
            updated.financial_review_date = Some(at);
        }
        RefundAction::ProcessPayment => {
            updated.payment_processor_name = actor;
            updated.payment_date = Some(at);
        }
        RefundAction::Reject => {
            updated.rejecter_name = actor;
            updated.rejection_date = Some(at);
            updated.rejection_reason = reason.map(str::to_string);
        }
    }

    Ok(updated)
}
