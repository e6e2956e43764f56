use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::geo::GeoPoint;
use crate::domain::place::{Place as DomainPlace, NewPlace as DomainNewPlace};
use crate::domain::types::{PlaceName, TypeConstraintError};

/// Diesel model representing the `places` table.
///
/// The store keeps only the scalar coordinates; the domain's `GeoPoint` is
/// derived from them during conversion.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::places)]
pub struct Place {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Place`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::places)]
pub struct NewPlace {
    pub name: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Place> for DomainPlace {
    type Error = TypeConstraintError;

    fn try_from(place: Place) -> Result<Self, Self::Error> {
        Ok(Self {
            id: place.id.try_into()?,
            name: PlaceName::new(place.name)?,
            description: place.description,
            point: GeoPoint::from_degrees(place.latitude, place.longitude)?,
            created_at: place.created_at,
            updated_at: place.updated_at,
        })
    }
}

impl From<DomainNewPlace> for NewPlace {
    fn from(place: DomainNewPlace) -> Self {
        Self {
            name: place.name.into_inner(),
            description: place.description,
            latitude: place.point.latitude().get(),
            longitude: place.point.longitude().get(),
            created_at: place.created_at,
            updated_at: place.updated_at,
        }
    }
}
