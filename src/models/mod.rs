//! Core data models for the Refund Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod booking;
mod policy;
mod quote;
mod refund_request;

pub use booking::{Booking, BookingSource};
pub use policy::{MAX_PENALTY_PERCENTAGE, PenaltyRule, RefundPolicy};
pub use quote::{AuditStep, AuditTrace, RefundQuote};
pub use refund_request::{RefundAction, RefundRequest, RefundStatus};
