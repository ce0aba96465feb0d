//! End-to-end pricing of an order: eligibility gate, distance, tier fee,
//! surcharge and free-delivery policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::DeliveryConfiguration;
use crate::distance::{distance_between, Coordinate};
use crate::eligibility::check_minimum_order;
use crate::error::{InvalidInputError, PricingError};
use crate::policy::{compute_total_fee, OrderCalculationResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Order subtotal in whole currency units.
    pub subtotal: Decimal,
    pub consumer: Coordinate,
    pub shop: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Quote {
    /// The subtotal is below the shop's least order value.
    Ineligible { message: String },
    Priced {
        distance_meters: f64,
        breakdown: OrderCalculationResult,
    },
}

impl Quote {
    #[must_use]
    pub fn breakdown(&self) -> Option<&OrderCalculationResult> {
        match self {
            Quote::Priced { breakdown, .. } => Some(breakdown),
            Quote::Ineligible { .. } => None,
        }
    }
}

/// Prices an order against a shop's delivery configuration.
///
/// Orders failing the eligibility gate return [`Quote::Ineligible`] without
/// touching the fee computation.
///
/// # Errors
///
/// Returns [`PricingError`] for invalid coordinates or subtotal, or a
/// configuration that cannot price the order.
pub fn quote_order(
    request: &QuoteRequest,
    config: &DeliveryConfiguration,
) -> Result<Quote, PricingError> {
    if request.subtotal < Decimal::ZERO {
        return Err(InvalidInputError::NegativeSubtotal(request.subtotal).into());
    }

    let eligibility = check_minimum_order(request.subtotal, config.least_order_value);
    if !eligibility.valid {
        let message = eligibility.message.unwrap_or_default();
        return Ok(Quote::Ineligible { message });
    }

    let distance_meters = distance_between(&request.consumer, &request.shop)?;
    let breakdown = compute_total_fee(request.subtotal, distance_meters, config)?;

    Ok(Quote::Priced {
        distance_meters,
        breakdown,
    })
}
