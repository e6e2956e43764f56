use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::geo::GeoPoint;
use crate::domain::place::NewPlace;
use crate::domain::types::{CategoryId, PlaceName, RadiusKm, TypeConstraintError};

const DEFAULT_RADIUS_KM: f64 = 1.0;
const DEFAULT_NEARBY_LIMIT: usize = 10;

/// Round coordinates to 6 decimal places (~0.1 m) at the boundary so stored
/// values are stable regardless of client float noise.
fn round_coordinate(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Body of `POST /v1/places`.
#[derive(Deserialize, Validate)]
pub struct CreatePlaceForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 1))]
    pub category_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePlaceFormPayload {
    pub name: PlaceName,
    pub description: Option<String>,
    pub point: GeoPoint,
    pub category_id: CategoryId,
}

impl CreatePlaceFormPayload {
    pub fn into_new_place(self) -> (NewPlace, CategoryId) {
        let now = Utc::now().naive_utc();
        let place = NewPlace {
            name: self.name,
            description: self.description,
            point: self.point,
            created_at: now,
            updated_at: now,
        };
        (place, self.category_id)
    }
}

#[derive(Debug, Error)]
pub enum CreatePlaceFormError {
    #[error("Create place form validation failed: {0}")]
    Validation(String),
    #[error("Create place form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreatePlaceFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreatePlaceFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreatePlaceForm> for CreatePlaceFormPayload {
    type Error = CreatePlaceFormError;

    fn try_from(value: CreatePlaceForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: PlaceName::new(value.name)?,
            description: value.description,
            point: GeoPoint::from_degrees(
                round_coordinate(value.latitude),
                round_coordinate(value.longitude),
            )?,
            category_id: CategoryId::new(value.category_id)?,
        })
    }
}

/// Query string of `GET /v1/places/nearby`.
#[derive(Deserialize, Validate, Debug)]
pub struct NearbyQueryParams {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(exclusive_min = 0.0, max = 10.0))]
    pub radius_km: Option<f64>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQueryPayload {
    pub origin: GeoPoint,
    pub radius: RadiusKm,
    pub limit: usize,
}

#[derive(Debug, Error)]
pub enum NearbyQueryError {
    #[error("Nearby query validation failed: {0}")]
    Validation(String),
    #[error("Nearby query contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for NearbyQueryError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for NearbyQueryError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<NearbyQueryParams> for NearbyQueryPayload {
    type Error = NearbyQueryError;

    fn try_from(value: NearbyQueryParams) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            origin: GeoPoint::from_degrees(value.latitude, value.longitude)?,
            radius: RadiusKm::new(value.radius_km.unwrap_or(DEFAULT_RADIUS_KM))?,
            limit: value.limit.unwrap_or(DEFAULT_NEARBY_LIMIT as i64) as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_coordinates_to_six_decimals() {
        let form = CreatePlaceForm {
            name: "Central Park".to_string(),
            description: None,
            latitude: 40.785091234567,
            longitude: -73.968285987654,
            category_id: 1,
        };

        let payload: CreatePlaceFormPayload = form.try_into().unwrap();
        assert_eq!(payload.point.latitude().get(), 40.785091);
        assert_eq!(payload.point.longitude().get(), -73.968286);
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let form = CreatePlaceForm {
            name: "Nowhere".to_string(),
            description: None,
            latitude: 91.0,
            longitude: 0.0,
            category_id: 1,
        };

        let payload: Result<CreatePlaceFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn nearby_defaults_radius_and_limit() {
        let params = NearbyQueryParams {
            latitude: 40.0,
            longitude: -74.0,
            radius_km: None,
            limit: None,
        };

        let payload: NearbyQueryPayload = params.try_into().unwrap();
        assert_eq!(payload.radius.get(), 1.0);
        assert_eq!(payload.limit, 10);
    }

    #[test]
    fn nearby_rejects_zero_radius() {
        let params = NearbyQueryParams {
            latitude: 40.0,
            longitude: -74.0,
            radius_km: Some(0.0),
            limit: None,
        };

        let payload: Result<NearbyQueryPayload, _> = params.try_into();
        assert!(payload.is_err());
    }
}
