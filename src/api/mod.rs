//! HTTP API module for the Refund Engine.
//!
//! This module provides the REST endpoints for browsing refund policies,
//! pricing cancellations, and moving refund requests through review.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CancellationRequest, EvaluateRequest, ListRefundsQuery, TransitionRequest};
pub use response::{ApiError, ApiErrorResponse, EvaluationResponse};
pub use state::AppState;
