use serde::Serialize;

use crate::domain::place::Place;
use crate::domain::types::DistanceKm;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Place> for PlaceDto {
    fn from(value: Place) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            description: value.description,
            latitude: value.point.latitude().get(),
            longitude: value.point.longitude().get(),
        }
    }
}

/// A place returned by the radius search, with its exact distance.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceWithDistanceDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}

impl From<(Place, DistanceKm)> for PlaceWithDistanceDto {
    fn from((place, distance): (Place, DistanceKm)) -> Self {
        Self {
            id: place.id.get(),
            name: place.name.into_inner(),
            description: place.description,
            latitude: place.point.latitude().get(),
            longitude: place.point.longitude().get(),
            distance_km: distance.get(),
        }
    }
}
