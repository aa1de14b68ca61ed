//! Refund lifecycle service.
//!
//! [`RefundLifecycleManager`] creates refund requests from cancelled
//! bookings and advances them through review. Its collaborators are passed
//! in at construction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::build_quote;
use crate::error::{EngineError, EngineResult};
use crate::models::{Booking, RefundAction, RefundQuote, RefundRequest, RefundStatus};
use crate::store::{BookingStore, PolicyStore, RefundStore};

use super::apply_transition;

/// A reviewer's instruction to move a refund request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionCommand {
    /// The action to apply.
    pub action: RefundAction,
    /// Who is acting.
    pub actor: String,
    /// Required when rejecting.
    #[serde(default)]
    pub reason: Option<String>,
    /// The version the reviewer last saw. When set, the transition fails if
    /// the request has changed since.
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// Creates, lists, and advances refund requests.
#[derive(Clone)]
pub struct RefundLifecycleManager {
    policies: Arc<dyn PolicyStore>,
    bookings: Arc<dyn BookingStore>,
    refunds: Arc<dyn RefundStore>,
}

impl RefundLifecycleManager {
    /// Creates a manager over the given stores.
    pub fn new(
        policies: Arc<dyn PolicyStore>,
        bookings: Arc<dyn BookingStore>,
        refunds: Arc<dyn RefundStore>,
    ) -> Self {
        Self {
            policies,
            bookings,
            refunds,
        }
    }

    /// Returns the policy store.
    pub fn policies(&self) -> &dyn PolicyStore {
        self.policies.as_ref()
    }

    /// Prices a cancellation without creating a request.
    pub fn quote(
        &self,
        booking: &Booking,
        policy_id: &str,
        at: DateTime<Utc>,
    ) -> EngineResult<RefundQuote> {
        let policy = self.policies.get_policy(policy_id)?;
        build_quote(booking, &policy, at)
    }

    /// Creates a refund request for a cancelled booking.
    ///
    /// The penalty and refund amounts are priced once here and never
    /// recomputed. Fails with [`EngineError::DuplicateRefund`] if the booking
    /// already has a refund that was not rejected.
    pub fn create_refund(
        &self,
        booking: &Booking,
        policy_id: &str,
        at: DateTime<Utc>,
    ) -> EngineResult<RefundRequest> {
        let quote = self.quote(booking, policy_id, at)?;
        let request = RefundRequest {
            id: Uuid::new_v4(),
            booking_id: booking.id.clone(),
            policy_id: quote.policy_id,
            request_date: at,
            original_amount: quote.original_amount,
            penalty_percentage: quote.penalty_percentage,
            penalty_amount: quote.penalty_amount,
            refund_amount: quote.refund_amount,
            status: RefundStatus::PendingExpertReview,
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
        };

        self.refunds
            .insert_unless_active(request.clone())
            .inspect_err(|err| {
                if let EngineError::DuplicateRefund { existing, .. } = err {
                    warn!(
                        booking_id = %booking.id,
                        existing = %existing,
                        "Refund already requested for booking"
                    );
                }
            })?;

        info!(
            refund_id = %request.id,
            booking_id = %request.booking_id,
            source = booking.source.label(),
            policy_id = %request.policy_id,
            hours_before_departure = %quote.hours_before_departure,
            penalty_percentage = %request.penalty_percentage,
            refund_amount = %request.refund_amount,
            "Refund request created"
        );

        Ok(request)
    }

    /// Looks up a booking and creates a refund request for it.
    pub fn request_cancellation(
        &self,
        booking_id: &str,
        policy_id: &str,
        at: DateTime<Utc>,
    ) -> EngineResult<RefundRequest> {
        let booking = self
            .bookings
            .get_booking(booking_id)?
            .ok_or_else(|| EngineError::BookingNotFound {
                booking_id: booking_id.to_string(),
            })?;
        self.create_refund(&booking, policy_id, at)
    }

    /// Returns a refund request by id.
    pub fn get(&self, id: Uuid) -> EngineResult<RefundRequest> {
        self.refunds
            .get(id)?
            .ok_or(EngineError::RefundNotFound { id })
    }

    /// Lists refund requests, optionally filtered by status.
    pub fn list(&self, status: Option<RefundStatus>) -> EngineResult<Vec<RefundRequest>> {
        self.refunds.list(status)
    }

    /// Applies a reviewer action to a stored refund request.
    ///
    /// The stored request is only replaced if nobody else changed it since
    /// it was read; otherwise this fails with
    /// [`EngineError::ConcurrentModification`] and nothing is written.
    pub fn transition(
        &self,
        id: Uuid,
        command: &TransitionCommand,
        at: DateTime<Utc>,
    ) -> EngineResult<RefundRequest> {
        let current = self.get(id)?;

        if let Some(expected) = command.expected_version {
            if expected != current.version {
                warn!(
                    refund_id = %id,
                    expected,
                    actual = current.version,
                    "Stale refund version"
                );
                return Err(EngineError::ConcurrentModification {
                    id,
                    expected,
                    actual: current.version,
                });
            }
        }

        let updated = apply_transition(
            &current,
            command.action,
            &command.actor,
            command.reason.as_deref(),
            at,
        )
        .inspect_err(|err| {
            debug!(refund_id = %id, action = %command.action, error = %err, "Transition refused");
        })?;

        self.refunds.compare_and_swap(current.version, updated.clone())?;

        info!(
            refund_id = %id,
            action = %command.action,
            actor = %command.actor.trim(),
            from = %current.status,
            to = %updated.status,
            version = updated.version,
            "Refund status changed"
        );

        Ok(updated)
    }
}
