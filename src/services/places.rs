use crate::dto::places::{PlaceDto, PlaceWithDistanceDto};
use crate::forms::places::{CreatePlaceFormPayload, NearbyQueryPayload};
use crate::repository::errors::RepositoryError;
use crate::repository::{NearbyQuery, PlaceReader, PlaceWriter};
use crate::services::{ServiceError, ServiceResult};

/// Creates a place together with its bootstrap category association.
///
/// The repository performs both inserts in one unit of work; an unknown
/// category id aborts the whole operation and surfaces as `NotFound`.
pub fn create_place<R>(payload: CreatePlaceFormPayload, repo: &R) -> ServiceResult<PlaceDto>
where
    R: PlaceWriter,
{
    let (place, category_id) = payload.into_new_place();
    match repo.create_place_with_category(&place, category_id) {
        Ok(created) => Ok(PlaceDto::from(created)),
        Err(RepositoryError::MissingReference { .. }) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to create place: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn nearby_places<R>(
    payload: NearbyQueryPayload,
    repo: &R,
) -> ServiceResult<Vec<PlaceWithDistanceDto>>
where
    R: PlaceReader,
{
    let query = NearbyQuery::new(payload.origin, payload.radius, payload.limit);
    match repo.nearby_places(&query) {
        Ok(places) => Ok(places.into_iter().map(PlaceWithDistanceDto::from).collect()),
        Err(e) => {
            log::error!("Failed to run nearby search: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::geo::GeoPoint;
    use crate::domain::place::Place;
    use crate::domain::types::{CategoryId, CategoryName, PlaceId, PlaceName};
    use crate::forms::places::{CreatePlaceForm, NearbyQueryParams};
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn sample_category(id: i32) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new("Food").unwrap(),
            description: None,
            is_active: true,
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn sample_place(id: i32, latitude: f64, longitude: f64) -> Place {
        Place {
            id: PlaceId::new(id).unwrap(),
            name: PlaceName::new(format!("Place {id}")).unwrap(),
            description: None,
            point: GeoPoint::from_degrees(latitude, longitude).unwrap(),
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn create_form(category_id: i32) -> CreatePlaceFormPayload {
        CreatePlaceForm {
            name: "Central Park".to_string(),
            description: None,
            latitude: 40.785091,
            longitude: -73.968285,
            category_id,
        }
        .try_into()
        .unwrap()
    }

    #[test]
    fn creates_place_with_existing_category() {
        let repo = TestRepository::new(vec![sample_category(1)], vec![], vec![]);
        let dto = create_place(create_form(1), &repo).unwrap();
        assert_eq!(dto.name, "Central Park");
        assert_eq!(dto.latitude, 40.785091);
    }

    #[test]
    fn create_fails_for_unknown_category() {
        let repo = TestRepository::default();
        let err = create_place(create_form(99), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[test]
    fn nearby_orders_by_distance_and_respects_radius() {
        let repo = TestRepository::new(
            vec![],
            vec![
                sample_place(1, 40.02, -74.0), // ~2.2 km north of origin
                sample_place(2, 40.005, -74.0), // ~0.6 km north of origin
                sample_place(3, 41.0, -75.0),  // far outside the radius
            ],
            vec![],
        );
        let params = NearbyQueryParams {
            latitude: 40.0,
            longitude: -74.0,
            radius_km: Some(5.0),
            limit: Some(10),
        };

        let places = nearby_places(params.try_into().unwrap(), &repo).unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].id, 2);
        assert_eq!(places[1].id, 1);
        assert!(places[0].distance_km <= places[1].distance_km);
        assert!(places.iter().all(|p| p.distance_km <= 5.0));
    }
}
