//! Refund request lifecycle.
//!
//! This module contains the pure approval state machine and the service
//! that persists requests and transitions through the storage ports.

mod manager;
mod state_machine;

pub use manager::{RefundLifecycleManager, TransitionCommand};
pub use state_machine::{apply_transition, next_status};
