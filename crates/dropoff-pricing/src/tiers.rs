//! Distance-tier fee resolution.
//!
//! Tiers are inclusive upper bounds: a distance of exactly `max_distance`
//! belongs to that tier. Past the last tier the fee is extrapolated per
//! started distance unit. Every branch is capped at the max fee.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, InvalidInputError, PricingError};

/// One step of the distance → fee function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceTier {
    /// Inclusive upper bound in meters.
    pub max_distance: f64,
    pub fee: Decimal,
}

impl DistanceTier {
    #[must_use]
    pub fn new(max_distance: f64, fee: Decimal) -> Self {
        Self { max_distance, fee }
    }
}

/// Extrapolation rate applied past the last tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeyondTierRate {
    /// Distance unit in meters; each started unit costs `fee_per_unit`.
    pub distance_unit: f64,
    pub fee_per_unit: Decimal,
}

pub(crate) fn check_tiers(tiers: &[DistanceTier]) -> Result<(), ConfigurationError> {
    if tiers.is_empty() {
        return Err(ConfigurationError::EmptyTiers);
    }
    for (index, tier) in tiers.iter().enumerate() {
        if !tier.max_distance.is_finite() || tier.max_distance < 0.0 {
            return Err(ConfigurationError::InvalidTierDistance {
                index,
                max_distance: tier.max_distance,
            });
        }
        if tier.fee < Decimal::ZERO {
            return Err(ConfigurationError::NegativeTierFee {
                index,
                fee: tier.fee,
            });
        }
    }
    Ok(())
}

/// Returns the tiers ordered ascending by `max_distance`.
///
/// The sort is stable, so tiers sharing a `max_distance` keep their listed
/// order and the first one listed wins.
#[must_use]
pub fn sorted_tiers(tiers: &[DistanceTier]) -> Vec<&DistanceTier> {
    let mut sorted: Vec<&DistanceTier> = tiers.iter().collect();
    sorted.sort_by(|a, b| a.max_distance.total_cmp(&b.max_distance));
    sorted
}

/// Largest configured `max_distance`, or `None` without tiers.
#[must_use]
pub fn outermost_distance(tiers: &[DistanceTier]) -> Option<f64> {
    tiers.iter().map(|t| t.max_distance).reduce(f64::max)
}

/// Resolves the delivery fee for `distance_meters`.
///
/// 1. The first tier (ascending, stable) whose `max_distance` is at least the
///    distance supplies the fee.
/// 2. Past every tier: `last.fee + ceil(excess / unit) * fee_per_unit`.
/// 3. The result is capped at `max_fee`.
///
/// # Errors
///
/// - [`ConfigurationError`] for empty or malformed tiers, a non-positive
///   `max_fee`, or an unusable beyond-tier rate when extrapolation is needed.
/// - [`InvalidInputError`] for a negative or non-finite distance.
pub fn resolve_tier_fee(
    distance_meters: f64,
    tiers: &[DistanceTier],
    beyond: BeyondTierRate,
    max_fee: Decimal,
) -> Result<Decimal, PricingError> {
    check_distance(distance_meters)?;
    check_tiers(tiers)?;
    if max_fee <= Decimal::ZERO {
        return Err(ConfigurationError::NonPositiveMaxFee(max_fee).into());
    }

    let sorted = sorted_tiers(tiers);

    if let Some(tier) = sorted.iter().find(|t| t.max_distance >= distance_meters) {
        tracing::debug!(
            distance_meters,
            tier_max_distance = tier.max_distance,
            fee = %tier.fee,
            "distance falls inside tier"
        );
        return Ok(tier.fee.min(max_fee));
    }

    // check_tiers guarantees at least one tier
    let Some(last) = sorted.last() else {
        return Err(ConfigurationError::EmptyTiers.into());
    };
    let fee = extrapolate(distance_meters, last, beyond, max_fee)?;
    tracing::debug!(
        distance_meters,
        last_tier_max_distance = last.max_distance,
        fee = %fee,
        "distance beyond last tier, fee extrapolated"
    );
    Ok(fee.min(max_fee))
}

fn extrapolate(
    distance_meters: f64,
    last: &DistanceTier,
    beyond: BeyondTierRate,
    max_fee: Decimal,
) -> Result<Decimal, ConfigurationError> {
    if !beyond.distance_unit.is_finite() || beyond.distance_unit <= 0.0 {
        return Err(ConfigurationError::InvalidBeyondUnit(beyond.distance_unit));
    }
    if beyond.fee_per_unit < Decimal::ZERO {
        return Err(ConfigurationError::NegativeAmount {
            field: "beyond_tier_fee_per_unit",
            value: beyond.fee_per_unit,
        });
    }

    let excess = distance_meters - last.max_distance;
    let units = (excess / beyond.distance_unit).ceil();

    // Anything that overflows Decimal is far past the cap.
    let fee = units
        .to_i64()
        .and_then(|units| Decimal::from(units).checked_mul(beyond.fee_per_unit))
        .and_then(|extra| last.fee.checked_add(extra))
        .unwrap_or(max_fee);
    Ok(fee)
}

fn check_distance(distance_meters: f64) -> Result<(), InvalidInputError> {
    if !distance_meters.is_finite() {
        return Err(InvalidInputError::NonFinite {
            field: "distance_meters",
            value: distance_meters,
        });
    }
    if distance_meters < 0.0 {
        return Err(InvalidInputError::NegativeDistance(distance_meters));
    }
    Ok(())
}
