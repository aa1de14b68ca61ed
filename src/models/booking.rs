//! Booking model and related types.
//!
//! A booking is the input record supplied by the cancellation flow. The
//! engine only reads the paid amount, the departure time, and where the
//! booking came from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Where a booking was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BookingSource {
    /// Booked directly against the carrier's reservation system.
    Direct {
        /// The passenger name record locator.
        pnr: String,
    },
    /// Booked through a third-party flight API.
    ExternalApi {
        /// The upstream provider name.
        provider: String,
        /// The provider's reference for the booking.
        external_reference: String,
    },
}

impl BookingSource {
    /// Returns a short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            BookingSource::Direct { .. } => "direct",
            BookingSource::ExternalApi { .. } => "external_api",
        }
    }
}

/// A ticket booking eligible for cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for the booking.
    pub id: String,
    /// The amount the passenger paid.
    pub amount: Decimal,
    /// ISO 4217 currency code of `amount`.
    pub currency: String,
    /// Scheduled departure of the first flight segment.
    pub departure_time: DateTime<Utc>,
    /// Where the booking was made.
    pub source: BookingSource,
}

impl Booking {
    /// Checks that the booking can be refunded.
    ///
    /// # Examples
    ///
    /// ```
    /// use refund_engine::models::{Booking, BookingSource};
    /// use chrono::{TimeZone, Utc};
    /// use rust_decimal::Decimal;
    ///
    /// let booking = Booking {
    ///     id: "bk_001".to_string(),
    ///     amount: Decimal::from(-5),
    ///     currency: "IRR".to_string(),
    ///     departure_time: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
    ///     source: BookingSource::Direct { pnr: "ABC123".to_string() },
    /// };
    /// assert!(booking.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidBooking {
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.amount < Decimal::ZERO {
            return Err(EngineError::InvalidBooking {
                field: "amount".to_string(),
                message: format!("must not be negative (got {})", self.amount),
            });
        }
        Ok(())
    }
}
