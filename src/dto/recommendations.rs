use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::recommendation::ExplorationRecommendation;
use crate::domain::review::ReviewEvent;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExplorationRecommendationDto {
    pub place_id: i32,
    pub place_name: String,
    pub category_id: i32,
    pub category_name: String,
    pub last_reviewed_at: Option<NaiveDateTime>,
    /// Present only when the request supplied an origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl From<ExplorationRecommendation> for ExplorationRecommendationDto {
    fn from(value: ExplorationRecommendation) -> Self {
        Self {
            place_id: value.place_id.get(),
            place_name: value.place_name.into_inner(),
            category_id: value.category_id.get(),
            category_name: value.category_name.into_inner(),
            last_reviewed_at: value.last_reviewed_at,
            distance_km: value.distance_km.map(|distance| distance.get()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReviewEventDto {
    pub id: i32,
    pub place_id: i32,
    pub category_id: i32,
    pub reviewed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl From<ReviewEvent> for ReviewEventDto {
    fn from(value: ReviewEvent) -> Self {
        Self {
            id: value.id.get(),
            place_id: value.place_id.get(),
            category_id: value.category_id.get(),
            reviewed_at: value.reviewed_at,
            created_at: value.created_at,
        }
    }
}
