//! Geographic coordinates attached to hierarchy nodes, scans and field records.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::error::{DomainError, DomainResult};

/// WGS84 latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Coordinates {
    /// Latitude in degrees (-90..=90)
    #[cfg_attr(feature = "openapi", schema(example = 13.0827))]
    pub lat: f64,
    /// Longitude in degrees (-180..=180)
    #[cfg_attr(feature = "openapi", schema(example = 80.2707))]
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> DomainResult<Self> {
        let coordinates = Self { lat, lng };
        coordinates.validate()?;
        Ok(coordinates)
    }

    /// Check both components are finite and inside their ranges.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.lat.is_finite() || !(MIN_LATITUDE..=MAX_LATITUDE).contains(&self.lat) {
            return Err(DomainError::validation(format!(
                "Latitude must be between {} and {}",
                MIN_LATITUDE, MAX_LATITUDE
            )));
        }
        if !self.lng.is_finite() || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.lng) {
            return Err(DomainError::validation(format!(
                "Longitude must be between {} and {}",
                MIN_LONGITUDE, MAX_LONGITUDE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundaries() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let err = Coordinates::new(90.5, 0.0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("Latitude")));
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        let err = Coordinates::new(0.0, -181.0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("Longitude")));
    }

    #[test]
    fn rejects_nan() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }
}
