//! Request types for the Refund Engine API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::TransitionCommand;
use crate::models::{Booking, RefundAction, RefundStatus};

/// Request body for `POST /policies/:id/evaluate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// Hours remaining before departure. May be fractional or negative.
    pub hours_before_departure: Decimal,
}

/// Request body for `POST /quotes` and `POST /refunds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancellationRequest {
    /// The booking being cancelled.
    pub booking: Booking,
    /// The refund policy to price the cancellation with.
    pub policy_id: String,
    /// When the cancellation takes effect. Defaults to now.
    #[serde(default)]
    pub requested_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /refunds/:id/transitions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// One of `expert_approve`, `financial_approve`, `process_payment`, `reject`.
    pub action: RefundAction,
    /// The reviewer performing the action.
    pub actor: String,
    /// Required when rejecting.
    #[serde(default)]
    pub reason: Option<String>,
    /// The version the reviewer last saw.
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// Query string for `GET /refunds`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRefundsQuery {
    /// Only return requests in this status.
    #[serde(default)]
    pub status: Option<RefundStatus>,
}

impl From<TransitionRequest> for TransitionCommand {
    fn from(req: TransitionRequest) -> Self {
        TransitionCommand {
            action: req.action,
            actor: req.actor,
            reason: req.reason,
            expected_version: req.expected_version,
        }
    }
}
