//! Refund amount calculation.
//!
//! Splits the amount a passenger paid into the penalty withheld and the
//! amount paid back.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::MAX_PENALTY_PERCENTAGE;

/// The monetary breakdown of a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundAmounts {
    /// The amount originally paid.
    pub original_amount: Decimal,
    /// `original_amount × penalty_percentage / 100`.
    pub penalty_amount: Decimal,
    /// `original_amount − penalty_amount`.
    pub refund_amount: Decimal,
}

/// Calculates the penalty and refund amounts.
///
/// Arithmetic is exact; no rounding is applied.
///
/// # Arguments
///
/// * `original_amount` - The amount the passenger paid (must not be negative)
/// * `penalty_percentage` - The selected penalty, between 0 and 100
///
/// # Examples
///
/// ```
/// use refund_engine::calculation::calculate_refund_amounts;
/// use rust_decimal::Decimal;
///
/// let amounts = calculate_refund_amounts(Decimal::from(10_000_000), Decimal::from(10)).unwrap();
/// assert_eq!(amounts.penalty_amount, Decimal::from(1_000_000));
/// assert_eq!(amounts.refund_amount, Decimal::from(9_000_000));
/// ```
pub fn calculate_refund_amounts(
    original_amount: Decimal,
    penalty_percentage: Decimal,
) -> EngineResult<RefundAmounts> {
    if original_amount < Decimal::ZERO {
        return Err(EngineError::InvalidBooking {
            field: "amount".to_string(),
            message: format!("must not be negative (got {})", original_amount),
        });
    }

    let penalty_amount = original_amount
        .checked_mul(penalty_percentage)
        .and_then(|v| v.checked_div(MAX_PENALTY_PERCENTAGE))
        .ok_or_else(|| EngineError::InvalidBooking {
            field: "amount".to_string(),
            message: format!("{} is too large to price", original_amount),
        })?;

    Ok(RefundAmounts {
        original_amount,
        penalty_amount,
        refund_amount: original_amount - penalty_amount,
    })
}
