use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::geo::GeoPoint;
use crate::domain::types::{PlaceId, PlaceName};

/// Canonical place record.
///
/// `point` is derived from the stored scalar coordinates when the record is
/// loaded or created; coordinates are immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: PlaceName,
    pub description: Option<String>,
    pub point: GeoPoint,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Place`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPlace {
    pub name: PlaceName,
    pub description: Option<String>,
    pub point: GeoPoint,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
