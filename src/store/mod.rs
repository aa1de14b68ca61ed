//! Storage ports for the Refund Engine.
//!
//! The lifecycle manager talks to its collaborators only through these
//! traits. Policies are reference data, bookings are owned by the booking
//! system, and refund requests are owned by this engine.

mod in_memory;

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Booking, RefundPolicy, RefundRequest, RefundStatus};

pub use in_memory::{InMemoryBookingStore, InMemoryRefundStore};

/// Read access to refund policies by id.
///
/// [`crate::config::ConfigLoader`] is the production implementation.
pub trait PolicyStore: Send + Sync {
    /// Returns the policy, or [`crate::error::EngineError::PolicyNotFound`].
    fn get_policy(&self, policy_id: &str) -> EngineResult<RefundPolicy>;

    /// Returns every policy, ordered by id.
    fn all_policies(&self) -> EngineResult<Vec<RefundPolicy>>;
}

/// Read access to bookings by id.
pub trait BookingStore: Send + Sync {
    /// Returns the booking, or `None` if it does not exist.
    fn get_booking(&self, booking_id: &str) -> EngineResult<Option<Booking>>;
}

/// Persistence for refund requests.
///
/// Updates use compare-and-swap on [`RefundRequest::version`] so that two
/// reviewers acting on the same request cannot both succeed.
pub trait RefundStore: Send + Sync {
    /// Stores a new request unless its booking already has one that was not
    /// rejected.
    ///
    /// The check and the write are a single atomic step. Fails with
    /// [`crate::error::EngineError::DuplicateRefund`] naming the active request.
    fn insert_unless_active(&self, request: RefundRequest) -> EngineResult<()>;

    /// Returns the request, or `None` if it does not exist.
    fn get(&self, id: Uuid) -> EngineResult<Option<RefundRequest>>;

    /// Replaces the stored request if its version equals `expected_version`.
    ///
    /// Fails with [`crate::error::EngineError::ConcurrentModification`] on a
    /// version mismatch and with [`crate::error::EngineError::RefundNotFound`]
    /// if the request does not exist.
    fn compare_and_swap(&self, expected_version: u64, request: RefundRequest) -> EngineResult<()>;

    /// Returns all requests for a booking.
    fn find_by_booking(&self, booking_id: &str) -> EngineResult<Vec<RefundRequest>>;

    /// Returns requests, optionally filtered by status, oldest first.
    fn list(&self, status: Option<RefundStatus>) -> EngineResult<Vec<RefundRequest>>;
}
