//! Great-circle distance between shop and consumer coordinates.

use serde::{Deserialize, Serialize};

use crate::error::{InvalidInputError, PricingError};

/// Mean Earth radius. All distances in the engine are meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Checks that both components are finite and within their ranges.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] naming the first offending component.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if !self.latitude.is_finite() {
            return Err(InvalidInputError::NonFinite {
                field: "latitude",
                value: self.latitude,
            });
        }
        if !self.longitude.is_finite() {
            return Err(InvalidInputError::NonFinite {
                field: "longitude",
                value: self.longitude,
            });
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(InvalidInputError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(InvalidInputError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

/// Haversine distance in meters between two points given in decimal degrees.
///
/// Performs no validation: NaN in, NaN out. Use [`distance_between`] when the
/// coordinates come from user input.
#[must_use]
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Validated distance in meters between two coordinates.
///
/// # Errors
///
/// Returns [`PricingError::InvalidInput`] if either coordinate is non-finite
/// or out of range.
pub fn distance_between(from: &Coordinate, to: &Coordinate) -> Result<f64, PricingError> {
    from.validate()?;
    to.validate()?;
    Ok(haversine_meters(
        from.latitude,
        from.longitude,
        to.latitude,
        to.longitude,
    ))
}
