use rust_decimal::Decimal;
use thiserror::Error;

/// Errors returned by the pricing engine.
///
/// Ineligible orders are not errors; see
/// [`check_minimum_order`](crate::check_minimum_order).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// The merchant's delivery configuration cannot produce a fee.
    #[error("delivery configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A caller-supplied value (coordinate, subtotal, distance) is unusable.
    #[error("invalid pricing input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Merchant data-entry mistakes in a [`DeliveryConfiguration`](crate::DeliveryConfiguration).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("no distance tiers are configured")]
    EmptyTiers,

    #[error("max delivery fee must be positive, got {0}")]
    NonPositiveMaxFee(Decimal),

    #[error("beyond-tier distance unit must be a positive number of meters, got {0}")]
    InvalidBeyondUnit(f64),

    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("tier {index} has invalid max distance {max_distance}")]
    InvalidTierDistance { index: usize, max_distance: f64 },

    #[error("tier {index} has negative fee {fee}")]
    NegativeTierFee { index: usize, fee: Decimal },

    #[error("free delivery radius must be a non-negative number of meters, got {0}")]
    InvalidFreeDeliveryRadius(f64),
}

/// Bad values passed into the engine at call time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("subtotal must not be negative, got {0}")]
    NegativeSubtotal(Decimal),

    #[error("distance must not be negative, got {0} m")]
    NegativeDistance(f64),

    #[error("amount {0} does not fit in integer cents")]
    CentsOverflow(Decimal),
}

impl PricingError {
    /// Returns `true` when the failure comes from merchant configuration
    /// rather than from the order being priced.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, PricingError::Configuration(_))
    }
}
