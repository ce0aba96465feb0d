//! Conversion from whole currency units to the integer cents stored on
//! persisted orders.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::{InvalidInputError, PricingError};
use crate::policy::OrderCalculationResult;

/// Rounds `amount` to two places (half away from zero) and returns cents.
///
/// # Errors
///
/// Returns [`InvalidInputError::CentsOverflow`] if the result does not fit in
/// an `i64`.
pub fn to_cents(amount: Decimal) -> Result<i64, PricingError> {
    amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| InvalidInputError::CentsOverflow(amount).into())
}

/// Charges in cents, ready for the order record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderCharges {
    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub surcharge_cents: i64,
    pub total_cents: i64,
}

impl OrderCharges {
    /// Converts a fee breakdown plus the order subtotal into cents.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::CentsOverflow`] if any amount or the total
    /// overflows.
    pub fn from_breakdown(
        subtotal: Decimal,
        breakdown: &OrderCalculationResult,
    ) -> Result<Self, PricingError> {
        let subtotal_cents = to_cents(subtotal)?;
        let delivery_fee_cents = to_cents(breakdown.base_fee)?;
        let surcharge_cents = to_cents(breakdown.surcharge)?;
        let total_cents = subtotal_cents
            .checked_add(delivery_fee_cents)
            .and_then(|t| t.checked_add(surcharge_cents))
            .ok_or(InvalidInputError::CentsOverflow(subtotal))?;

        Ok(Self {
            subtotal_cents,
            delivery_fee_cents,
            surcharge_cents,
            total_cents,
        })
    }
}
