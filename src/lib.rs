//! Refund Engine for airline booking cancellations
//!
//! This crate prices cancelled bookings against time-tiered penalty policies
//! and tracks each resulting refund request through expert review, financial
//! review, and payment.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod store;
