//! Surcharge and free-delivery policy on top of the tier fee.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::DeliveryConfiguration;
use crate::error::{InvalidInputError, PricingError};
use crate::tiers::{outermost_distance, resolve_tier_fee};

/// Fee breakdown for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderCalculationResult {
    pub base_fee: Decimal,
    pub surcharge: Decimal,
    pub free_delivery_applied: bool,
    /// `base_fee + surcharge`, or zero under free delivery.
    pub final_fee: Decimal,
    /// The order lies past every configured tier. Reporting only; the fee is
    /// still extrapolated.
    pub out_of_zone: bool,
}

impl OrderCalculationResult {
    fn free_delivery(out_of_zone: bool) -> Self {
        Self {
            base_fee: Decimal::ZERO,
            surcharge: Decimal::ZERO,
            free_delivery_applied: true,
            final_fee: Decimal::ZERO,
            out_of_zone,
        }
    }
}

/// `true` when the distance is past the largest tier bound, or no tiers exist.
#[must_use]
pub fn is_out_of_zone(distance_meters: f64, config: &DeliveryConfiguration) -> bool {
    outermost_distance(&config.distance_tiers).is_none_or(|outer| distance_meters > outer)
}

/// `true` when both the subtotal threshold and the radius condition hold.
#[must_use]
pub fn qualifies_for_free_delivery(
    subtotal: Decimal,
    distance_meters: f64,
    config: &DeliveryConfiguration,
) -> bool {
    subtotal >= config.free_delivery_threshold && distance_meters <= config.free_delivery_radius
}

/// Computes the complete delivery charge for an order.
///
/// Free delivery overrides everything, including the small-order surcharge.
/// Otherwise the tier fee is resolved and the surcharge is added when the
/// subtotal is below `minimum_order_value`.
///
/// # Errors
///
/// - [`InvalidInputError`] for a negative subtotal or a negative/non-finite
///   distance.
/// - Any error from [`resolve_tier_fee`] when free delivery does not apply.
pub fn compute_total_fee(
    subtotal: Decimal,
    distance_meters: f64,
    config: &DeliveryConfiguration,
) -> Result<OrderCalculationResult, PricingError> {
    if subtotal < Decimal::ZERO {
        return Err(InvalidInputError::NegativeSubtotal(subtotal).into());
    }
    if !distance_meters.is_finite() {
        return Err(InvalidInputError::NonFinite {
            field: "distance_meters",
            value: distance_meters,
        }
        .into());
    }
    if distance_meters < 0.0 {
        return Err(InvalidInputError::NegativeDistance(distance_meters).into());
    }

    let out_of_zone = is_out_of_zone(distance_meters, config);

    if qualifies_for_free_delivery(subtotal, distance_meters, config) {
        tracing::debug!(%subtotal, distance_meters, "free delivery applied");
        return Ok(OrderCalculationResult::free_delivery(out_of_zone));
    }

    let base_fee = resolve_tier_fee(
        distance_meters,
        &config.distance_tiers,
        config.beyond_tier_rate(),
        config.max_delivery_fee,
    )?;

    let surcharge = if subtotal < config.minimum_order_value {
        config.small_order_surcharge
    } else {
        Decimal::ZERO
    };

    let result = OrderCalculationResult {
        base_fee,
        surcharge,
        free_delivery_applied: false,
        final_fee: base_fee + surcharge,
        out_of_zone,
    };
    tracing::debug!(
        %subtotal,
        distance_meters,
        base_fee = %result.base_fee,
        surcharge = %result.surcharge,
        final_fee = %result.final_fee,
        out_of_zone,
        "delivery fee computed"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;
    use crate::tiers::DistanceTier;

    fn config() -> DeliveryConfiguration {
        DeliveryConfiguration::default()
    }

    #[test]
    fn breakdown_serializes_amounts_as_strings() {
        let result = compute_total_fee(Decimal::from(150), 350.0, &config()).unwrap();
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "base_fee": "30",
                "surcharge": "40",
                "free_delivery_applied": false,
                "final_fee": "70",
                "out_of_zone": false
            })
        );
    }

    #[test]
    fn small_order_inside_tiers() {
        let result = compute_total_fee(Decimal::from(150), 350.0, &config()).unwrap();
        assert_eq!(
            result,
            OrderCalculationResult {
                base_fee: Decimal::from(30),
                surcharge: Decimal::from(40),
                free_delivery_applied: false,
                final_fee: Decimal::from(70),
                out_of_zone: false,
            }
        );
    }

    #[test]
    fn free_delivery_overrides_tier_fee() {
        let result = compute_total_fee(Decimal::from(900), 500.0, &config()).unwrap();
        assert!(result.free_delivery_applied);
        assert_eq!(result.final_fee, Decimal::ZERO);
        assert_eq!(result.base_fee, Decimal::ZERO);
        assert_eq!(result.surcharge, Decimal::ZERO);
    }

    #[test]
    fn free_delivery_overrides_surcharge() {
        // Threshold below the surcharge minimum: the order qualifies for both.
        let config = DeliveryConfiguration {
            free_delivery_threshold: Decimal::from(50),
            ..config()
        };
        let result = compute_total_fee(Decimal::from(60), 100.0, &config).unwrap();
        assert!(result.free_delivery_applied);
        assert_eq!(result.surcharge, Decimal::ZERO);
        assert_eq!(result.final_fee, Decimal::ZERO);
    }

    #[test]
    fn free_delivery_bounds_are_inclusive() {
        let result = compute_total_fee(Decimal::from(800), 1000.0, &config()).unwrap();
        assert!(result.free_delivery_applied);
    }

    #[test]
    fn large_order_outside_radius_pays_tier_fee() {
        let result = compute_total_fee(Decimal::from(900), 1500.0, &config()).unwrap();
        assert!(!result.free_delivery_applied);
        assert_eq!(result.base_fee, Decimal::from(80));
        assert_eq!(result.surcharge, Decimal::ZERO);
        assert_eq!(result.final_fee, Decimal::from(80));
        assert!(result.out_of_zone);
    }

    #[test]
    fn surcharge_boundary_is_exclusive() {
        let at_minimum = compute_total_fee(Decimal::from(200), 100.0, &config()).unwrap();
        assert_eq!(at_minimum.surcharge, Decimal::ZERO);
        let below = compute_total_fee(Decimal::new(19999, 2), 100.0, &config()).unwrap();
        assert_eq!(below.surcharge, Decimal::from(40));
    }

    #[test]
    fn out_of_zone_at_outer_bound_is_false() {
        assert!(!is_out_of_zone(1000.0, &config()));
        assert!(is_out_of_zone(1000.5, &config()));
    }

    #[test]
    fn no_tiers_counts_as_out_of_zone() {
        let config = DeliveryConfiguration {
            distance_tiers: vec![],
            ..config()
        };
        assert!(is_out_of_zone(0.0, &config));
    }

    #[test]
    fn free_delivery_still_applies_without_tiers() {
        let config = DeliveryConfiguration {
            distance_tiers: vec![],
            ..config()
        };
        let result = compute_total_fee(Decimal::from(900), 10.0, &config).unwrap();
        assert!(result.free_delivery_applied);
        assert!(result.out_of_zone);
    }

    #[test]
    fn paid_delivery_without_tiers_is_configuration_error() {
        let config = DeliveryConfiguration {
            distance_tiers: vec![],
            ..config()
        };
        let err = compute_total_fee(Decimal::from(100), 10.0, &config).unwrap_err();
        assert_eq!(err, PricingError::Configuration(ConfigurationError::EmptyTiers));
    }

    #[test]
    fn negative_subtotal_is_rejected() {
        let err = compute_total_fee(Decimal::from(-1), 10.0, &config()).unwrap_err();
        assert_eq!(
            err,
            PricingError::InvalidInput(InvalidInputError::NegativeSubtotal(Decimal::from(-1)))
        );
    }

    #[test]
    fn infinite_distance_is_rejected() {
        let err = compute_total_fee(Decimal::from(100), f64::INFINITY, &config()).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidInput(InvalidInputError::NonFinite { .. })
        ));
    }

    #[test]
    fn surcharge_applies_iff_below_minimum_and_not_free() {
        let config = config();
        for subtotal in (0..=1_000).step_by(25) {
            let subtotal = Decimal::from(subtotal);
            for distance in [0.0, 350.0, 999.0, 1000.0, 1001.0, 4000.0] {
                let result = compute_total_fee(subtotal, distance, &config).unwrap();
                let free = subtotal >= config.free_delivery_threshold
                    && distance <= config.free_delivery_radius;
                let expect_surcharge = subtotal < config.minimum_order_value && !free;
                assert_eq!(result.free_delivery_applied, free, "{subtotal} @ {distance}");
                assert_eq!(
                    result.surcharge > Decimal::ZERO,
                    expect_surcharge,
                    "{subtotal} @ {distance}"
                );
                if free {
                    assert_eq!(result.final_fee, Decimal::ZERO);
                } else {
                    assert_eq!(result.final_fee, result.base_fee + result.surcharge);
                }
            }
        }
    }

    #[test]
    fn free_delivery_ignores_tier_configuration() {
        let odd_tiers = DeliveryConfiguration {
            distance_tiers: vec![DistanceTier::new(1.0, Decimal::from(500))],
            small_order_surcharge: Decimal::from(999),
            ..config()
        };
        let result = compute_total_fee(Decimal::from(2_000), 900.0, &odd_tiers).unwrap();
        assert_eq!(result.final_fee, Decimal::ZERO);
    }
}
