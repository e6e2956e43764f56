//! Geographic value objects and distance math.
//!
//! All coordinates are WGS84 degrees; all distances are kilometers. Degrees
//! are converted to radians exactly once, inside [`GeoPoint::distance_km`].

use serde::{Deserialize, Serialize};

use crate::domain::types::{DistanceKm, Latitude, Longitude, RadiusKm, TypeConstraintError};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the globe, derived from a place's scalar coordinates.
///
/// The point is constructed from validated latitude/longitude and never
/// mutated independently of them.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    latitude: Latitude,
    longitude: Longitude,
}

/// Latitude/longitude envelope used to prefilter candidates before the exact
/// distance check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoPoint {
    pub fn new(latitude: Latitude, longitude: Longitude) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Constructs a point from raw degrees, validating both ranges.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            latitude: Latitude::new(latitude)?,
            longitude: Longitude::new(longitude)?,
        })
    }

    pub fn latitude(&self) -> Latitude {
        self.latitude
    }

    pub fn longitude(&self) -> Longitude {
        self.longitude
    }

    /// Great-circle distance to `other` using the haversine formula.
    pub fn distance_km(&self, other: &GeoPoint) -> DistanceKm {
        let lat1_rad = self.latitude.get().to_radians();
        let lat2_rad = other.latitude.get().to_radians();
        let delta_lat = (other.latitude.get() - self.latitude.get()).to_radians();
        let delta_lon = (other.longitude.get() - self.longitude.get()).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        // Haversine of validated coordinates is finite and non-negative.
        DistanceKm::new(EARTH_RADIUS_KM * c).expect("haversine distance is finite and non-negative")
    }

    /// Envelope guaranteed to contain every point within `radius` of `self`.
    ///
    /// The box over-approximates: callers must still apply the exact distance
    /// predicate. Near the poles or the antimeridian the longitude span
    /// widens to the full range instead of wrapping.
    pub fn bounding_box(&self, radius: RadiusKm) -> BoundingBox {
        let delta_lat = (radius.get() / EARTH_RADIUS_KM).to_degrees();
        let min_lat = (self.latitude.get() - delta_lat).max(-90.0);
        let max_lat = (self.latitude.get() + delta_lat).min(90.0);

        let cos_lat = self.latitude.get().to_radians().cos();
        if cos_lat <= f64::EPSILON {
            return BoundingBox {
                min_lat,
                max_lat,
                min_lon: -180.0,
                max_lon: 180.0,
            };
        }

        let delta_lon = delta_lat / cos_lat;
        let min_lon = self.longitude.get() - delta_lon;
        let max_lon = self.longitude.get() + delta_lon;
        if min_lon < -180.0 || max_lon > 180.0 {
            return BoundingBox {
                min_lat,
                max_lat,
                min_lon: -180.0,
                max_lon: 180.0,
            };
        }

        BoundingBox {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }
}
