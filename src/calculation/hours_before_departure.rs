//! Time-to-departure calculation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

/// Returns the hours between `at` and `departure_time`.
///
/// The result keeps fractional hours and is negative once the departure has
/// passed. Sub-second precision is dropped.
///
/// # Examples
///
/// ```
/// use refund_engine::calculation::hours_before_departure;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let departure = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
/// let at = Utc.with_ymd_and_hms(2026, 3, 1, 6, 30, 0).unwrap();
/// assert_eq!(hours_before_departure(departure, at), Decimal::from_str("1.5").unwrap());
/// ```
pub fn hours_before_departure(departure_time: DateTime<Utc>, at: DateTime<Utc>) -> Decimal {
    let seconds = (departure_time - at).num_seconds();
    (Decimal::from(seconds) / SECONDS_PER_HOUR).normalize()
}
