use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, PricingError};
use crate::tiers::{check_tiers, BeyondTierRate, DistanceTier};

/// Per-shop delivery pricing settings, edited by the merchant.
///
/// Money fields are whole currency units; distances are meters. Fields
/// missing from a serialized configuration take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfiguration {
    /// Subtotals below this pay the small-order surcharge.
    pub minimum_order_value: Decimal,
    pub small_order_surcharge: Decimal,
    /// Subtotals below this are rejected outright.
    pub least_order_value: Decimal,
    pub distance_tiers: Vec<DistanceTier>,
    pub max_delivery_fee: Decimal,
    pub beyond_tier_fee_per_unit: Decimal,
    /// Meters per extrapolation step past the last tier.
    pub beyond_tier_distance_unit: f64,
    pub free_delivery_threshold: Decimal,
    /// Meters from the shop within which free delivery can apply.
    pub free_delivery_radius: f64,
}

impl Default for DeliveryConfiguration {
    fn default() -> Self {
        Self {
            minimum_order_value: Decimal::from(200),
            small_order_surcharge: Decimal::from(40),
            least_order_value: Decimal::from(100),
            distance_tiers: vec![
                DistanceTier::new(200.0, Decimal::from(20)),
                DistanceTier::new(400.0, Decimal::from(30)),
                DistanceTier::new(600.0, Decimal::from(40)),
                DistanceTier::new(800.0, Decimal::from(50)),
                DistanceTier::new(1000.0, Decimal::from(60)),
            ],
            max_delivery_fee: Decimal::from(130),
            beyond_tier_fee_per_unit: Decimal::from(10),
            beyond_tier_distance_unit: 250.0,
            free_delivery_threshold: Decimal::from(800),
            free_delivery_radius: 1000.0,
        }
    }
}

/// Non-fatal findings surfaced to the merchant before saving.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigWarning {
    /// Orders that would pay the surcharge are rejected by the eligibility
    /// gate first, so the surcharge never applies.
    LeastAboveMinimum {
        least_order_value: Decimal,
        minimum_order_value: Decimal,
    },
    /// Tiers are not listed in ascending distance order.
    UnsortedTiers,
    /// Two or more tiers share a bound; only the first listed is reachable.
    DuplicateTierDistance { max_distance: f64 },
    /// A tier charges more than the cap and is silently clamped.
    TierAboveMaxFee { max_distance: f64, fee: Decimal },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::LeastAboveMinimum {
                least_order_value,
                minimum_order_value,
            } => write!(
                f,
                "least order value {least_order_value} is above the minimum order value \
                 {minimum_order_value}; the small-order surcharge can never apply"
            ),
            ConfigWarning::UnsortedTiers => {
                write!(f, "distance tiers are not in ascending order")
            }
            ConfigWarning::DuplicateTierDistance { max_distance } => write!(
                f,
                "several tiers end at {max_distance} m; only the first one is used"
            ),
            ConfigWarning::TierAboveMaxFee { max_distance, fee } => write!(
                f,
                "tier ending at {max_distance} m charges {fee}, above the max delivery fee"
            ),
        }
    }
}

impl DeliveryConfiguration {
    #[must_use]
    pub fn beyond_tier_rate(&self) -> BeyondTierRate {
        BeyondTierRate {
            distance_unit: self.beyond_tier_distance_unit,
            fee_per_unit: self.beyond_tier_fee_per_unit,
        }
    }

    /// Validates the configuration the way the settings screen does before
    /// saving.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Configuration`] for settings that would make
    /// fee computation fail or produce nonsense.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, PricingError> {
        check_tiers(&self.distance_tiers)?;

        if self.max_delivery_fee <= Decimal::ZERO {
            return Err(ConfigurationError::NonPositiveMaxFee(self.max_delivery_fee).into());
        }
        if !self.beyond_tier_distance_unit.is_finite() || self.beyond_tier_distance_unit <= 0.0 {
            return Err(
                ConfigurationError::InvalidBeyondUnit(self.beyond_tier_distance_unit).into(),
            );
        }
        if !self.free_delivery_radius.is_finite() || self.free_delivery_radius < 0.0 {
            return Err(
                ConfigurationError::InvalidFreeDeliveryRadius(self.free_delivery_radius).into(),
            );
        }
        for (field, value) in [
            ("minimum_order_value", self.minimum_order_value),
            ("small_order_surcharge", self.small_order_surcharge),
            ("least_order_value", self.least_order_value),
            ("beyond_tier_fee_per_unit", self.beyond_tier_fee_per_unit),
            ("free_delivery_threshold", self.free_delivery_threshold),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigurationError::NegativeAmount { field, value }.into());
            }
        }

        Ok(self.warnings())
    }

    fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.least_order_value > self.minimum_order_value {
            warnings.push(ConfigWarning::LeastAboveMinimum {
                least_order_value: self.least_order_value,
                minimum_order_value: self.minimum_order_value,
            });
        }

        let tiers = &self.distance_tiers;
        if tiers
            .windows(2)
            .any(|pair| pair[0].max_distance > pair[1].max_distance)
        {
            warnings.push(ConfigWarning::UnsortedTiers);
        }

        let mut reported: Vec<f64> = Vec::new();
        for (i, tier) in tiers.iter().enumerate() {
            let duplicated = tiers[i + 1..]
                .iter()
                .any(|other| other.max_distance == tier.max_distance);
            if duplicated && !reported.contains(&tier.max_distance) {
                reported.push(tier.max_distance);
                warnings.push(ConfigWarning::DuplicateTierDistance {
                    max_distance: tier.max_distance,
                });
            }
        }

        for tier in tiers {
            if tier.fee > self.max_delivery_fee {
                warnings.push(ConfigWarning::TierAboveMaxFee {
                    max_distance: tier.max_distance,
                    fee: tier.fee,
                });
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid_without_warnings() {
        let warnings = DeliveryConfiguration::default().validate().expect("valid");
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn empty_tiers_fail_validation() {
        let config = DeliveryConfiguration {
            distance_tiers: vec![],
            ..DeliveryConfiguration::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            PricingError::Configuration(ConfigurationError::EmptyTiers)
        );
    }

    #[test]
    fn negative_beyond_unit_fails_validation() {
        let config = DeliveryConfiguration {
            beyond_tier_distance_unit: -5.0,
            ..DeliveryConfiguration::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            PricingError::Configuration(ConfigurationError::InvalidBeyondUnit(-5.0))
        );
    }

    #[test]
    fn negative_surcharge_fails_validation() {
        let config = DeliveryConfiguration {
            small_order_surcharge: Decimal::from(-1),
            ..DeliveryConfiguration::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("small_order_surcharge"), "{err}");
    }

    #[test]
    fn least_above_minimum_is_only_a_warning() {
        let config = DeliveryConfiguration {
            least_order_value: Decimal::from(300),
            ..DeliveryConfiguration::default()
        };
        let warnings = config.validate().expect("still valid");
        assert_eq!(
            warnings,
            vec![ConfigWarning::LeastAboveMinimum {
                least_order_value: Decimal::from(300),
                minimum_order_value: Decimal::from(200),
            }]
        );
    }

    #[test]
    fn unsorted_and_duplicate_tiers_warn_once() {
        let config = DeliveryConfiguration {
            distance_tiers: vec![
                DistanceTier::new(500.0, Decimal::from(30)),
                DistanceTier::new(200.0, Decimal::from(20)),
                DistanceTier::new(500.0, Decimal::from(35)),
                DistanceTier::new(500.0, Decimal::from(40)),
            ],
            ..DeliveryConfiguration::default()
        };
        let warnings = config.validate().expect("valid");
        assert!(warnings.contains(&ConfigWarning::UnsortedTiers));
        let duplicates = warnings
            .iter()
            .filter(|w| matches!(w, ConfigWarning::DuplicateTierDistance { .. }))
            .count();
        assert_eq!(duplicates, 1);
    }

    #[test]
    fn tier_above_cap_warns() {
        let config = DeliveryConfiguration {
            max_delivery_fee: Decimal::from(45),
            ..DeliveryConfiguration::default()
        };
        let warnings = config.validate().expect("valid");
        assert_eq!(
            warnings
                .iter()
                .filter(|w| matches!(w, ConfigWarning::TierAboveMaxFee { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: DeliveryConfiguration =
            serde_json::from_str(r#"{"max_delivery_fee": 90, "free_delivery_radius": 500}"#)
                .expect("parse");
        assert_eq!(config.max_delivery_fee, Decimal::from(90));
        assert!((config.free_delivery_radius - 500.0).abs() < f64::EPSILON);
        assert_eq!(config.distance_tiers.len(), 5);
        assert_eq!(config.small_order_surcharge, Decimal::from(40));
    }

    #[test]
    fn warning_messages_are_readable() {
        let warning = ConfigWarning::LeastAboveMinimum {
            least_order_value: Decimal::from(300),
            minimum_order_value: Decimal::from(200),
        };
        assert!(warning.to_string().contains("can never apply"));
    }
}
