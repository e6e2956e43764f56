use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::geo::GeoPoint;
use crate::domain::types::{CategoryId, PlaceId, TypeConstraintError};

const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;

/// Query string of `GET /v1/recommendations/explore`.
///
/// Latitude and longitude are optional but must be supplied together; with
/// them the ranking becomes proximity-aware.
#[derive(Deserialize, Validate, Debug)]
pub struct ExploreQueryParams {
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<i64>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExploreQueryPayload {
    pub limit: usize,
    pub origin: Option<GeoPoint>,
}

#[derive(Debug, Error)]
pub enum ExploreQueryError {
    #[error("Explore query validation failed: {0}")]
    Validation(String),
    #[error("Explore query contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ExploreQueryError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ExploreQueryError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ExploreQueryParams> for ExploreQueryPayload {
    type Error = ExploreQueryError;

    fn try_from(value: ExploreQueryParams) -> Result<Self, Self::Error> {
        value.validate()?;

        let origin = match (value.latitude, value.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::from_degrees(latitude, longitude)?),
            (None, None) => None,
            _ => {
                return Err(ExploreQueryError::Validation(
                    "latitude and longitude must be supplied together".to_string(),
                ));
            }
        };

        Ok(Self {
            limit: value.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT as i64) as usize,
            origin,
        })
    }
}

/// Body of `POST /v1/reviews`.
#[derive(Deserialize, Validate)]
pub struct RecordReviewForm {
    #[validate(range(min = 1))]
    pub place_id: i32,
    #[validate(range(min = 1))]
    pub category_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordReviewFormPayload {
    pub place_id: PlaceId,
    pub category_id: CategoryId,
}

#[derive(Debug, Error)]
pub enum RecordReviewFormError {
    #[error("Record review form validation failed: {0}")]
    Validation(String),
    #[error("Record review form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for RecordReviewFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for RecordReviewFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<RecordReviewForm> for RecordReviewFormPayload {
    type Error = RecordReviewFormError;

    fn try_from(value: RecordReviewForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            place_id: PlaceId::new(value.place_id)?,
            category_id: CategoryId::new(value.category_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explore_defaults_limit_without_origin() {
        let params = ExploreQueryParams {
            limit: None,
            latitude: None,
            longitude: None,
        };

        let payload: ExploreQueryPayload = params.try_into().unwrap();
        assert_eq!(payload.limit, 10);
        assert!(payload.origin.is_none());
    }

    #[test]
    fn explore_accepts_full_origin() {
        let params = ExploreQueryParams {
            limit: Some(5),
            latitude: Some(40.0),
            longitude: Some(-74.0),
        };

        let payload: ExploreQueryPayload = params.try_into().unwrap();
        assert_eq!(payload.limit, 5);
        assert!(payload.origin.is_some());
    }

    #[test]
    fn explore_rejects_half_an_origin() {
        let params = ExploreQueryParams {
            limit: None,
            latitude: Some(40.0),
            longitude: None,
        };

        let payload: Result<ExploreQueryPayload, _> = params.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn record_review_validates_ids() {
        let form = RecordReviewForm {
            place_id: 1,
            category_id: 2,
        };
        let payload: RecordReviewFormPayload = form.try_into().unwrap();
        assert_eq!(payload.place_id.get(), 1);
        assert_eq!(payload.category_id.get(), 2);
    }
}
