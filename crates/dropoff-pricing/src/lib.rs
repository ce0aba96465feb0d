//! Delivery fee and order eligibility pricing.
//!
//! Pure and synchronous: no I/O, no shared state. Money is exact
//! [`Decimal`](rust_decimal::Decimal) in whole currency units, distances are
//! meters. Use [`OrderCharges`] to convert to cents at the persistence
//! boundary.
//!
//! ```ignore
//! use dropoff_pricing::{quote_order, Coordinate, DeliveryConfiguration, QuoteRequest};
//!
//! let quote = quote_order(
//!     &QuoteRequest {
//!         subtotal: 150.into(),
//!         consumer: Coordinate::new(31.5234, 74.3587),
//!         shop: Coordinate::new(31.5204, 74.3587),
//!     },
//!     &DeliveryConfiguration::default(),
//! )?;
//! ```

pub mod config;
pub mod distance;
pub mod eligibility;
pub mod error;
pub mod money;
pub mod policy;
pub mod quote;
pub mod tiers;

pub use config::{ConfigWarning, DeliveryConfiguration};
pub use distance::{distance_between, haversine_meters, Coordinate, EARTH_RADIUS_METERS};
pub use eligibility::{check_minimum_order, EligibilityOutcome};
pub use error::{ConfigurationError, InvalidInputError, PricingError};
pub use money::{to_cents, OrderCharges};
pub use policy::{
    compute_total_fee, is_out_of_zone, qualifies_for_free_delivery, OrderCalculationResult,
};
pub use quote::{quote_order, Quote, QuoteRequest};
pub use tiers::{outermost_distance, resolve_tier_fee, sorted_tiers, BeyondTierRate, DistanceTier};
