//! Error types for the Refund Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while quoting, creating, and
//! reviewing refund requests.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{RefundAction, RefundStatus};

/// The main error type for the Refund Engine.
///
/// Only [`EngineError::ConcurrentModification`] and
/// [`EngineError::StoreUnavailable`] can succeed on retry.
///
/// # Example
///
/// ```
/// use refund_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policies".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policies");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested action is not legal from the request's current status.
    #[error("Action '{action}' is not permitted while the refund is {status}")]
    InvalidTransition {
        /// The status the request was in.
        status: RefundStatus,
        /// The action that was attempted.
        action: RefundAction,
    },

    /// A rejection was attempted without a reason.
    #[error("A non-empty reason is required to reject a refund")]
    MissingReason,

    /// A transition was attempted without an actor identity.
    #[error("An actor name is required to change a refund's status")]
    MissingActor,

    /// The request is already completed or rejected.
    #[error("Refund is already {status} and can no longer change")]
    TerminalState {
        /// The terminal status of the request.
        status: RefundStatus,
    },

    /// A policy cannot produce a penalty for the given input.
    #[error("Refund policy '{policy_id}' is misconfigured: {message}")]
    PolicyConfiguration {
        /// The offending policy.
        policy_id: String,
        /// What is wrong with it.
        message: String,
    },

    /// No policy with the given id is loaded.
    #[error("Refund policy not found: {policy_id}")]
    PolicyNotFound {
        /// The policy id that was not found.
        policy_id: String,
    },

    /// No booking with the given id exists.
    #[error("Booking not found: {booking_id}")]
    BookingNotFound {
        /// The booking id that was not found.
        booking_id: String,
    },

    /// No refund request with the given id exists.
    #[error("Refund request not found: {id}")]
    RefundNotFound {
        /// The refund id that was not found.
        id: Uuid,
    },

    /// The booking already has a refund that has not been rejected.
    #[error("Booking '{booking_id}' already has an active refund request {existing}")]
    DuplicateRefund {
        /// The booking being cancelled.
        booking_id: String,
        /// The id of the existing refund request.
        existing: Uuid,
    },

    /// The stored request changed since the caller read it.
    #[error("Refund {id} was modified concurrently (expected version {expected}, found {actual})")]
    ConcurrentModification {
        /// The refund id.
        id: Uuid,
        /// The version the caller expected.
        expected: u64,
        /// The version currently stored.
        actual: u64,
    },

    /// A booking record was invalid or contained inconsistent data.
    #[error("Invalid booking field '{field}': {message}")]
    InvalidBooking {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A store could not be read or written.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
