use chrono::Utc;
use diesel::prelude::*;

use crate::domain::place::{NewPlace, Place};
use crate::domain::types::{CategoryId, DistanceKm, PlaceId};
use crate::models::place::{NewPlace as DbNewPlace, Place as DbPlace};
use crate::models::review::NewReviewEvent as DbNewReviewEvent;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, NearbyQuery, PlaceReader, PlaceWriter};

impl PlaceReader for DieselRepository {
    fn get_place_by_id(&self, id: PlaceId) -> RepositoryResult<Option<Place>> {
        use crate::schema::places;

        let mut conn = self.conn()?;

        let place = places::table
            .filter(places::id.eq(id.get()))
            .first::<DbPlace>(&mut conn)
            .optional()?;

        let place = place.map(TryInto::try_into).transpose()?;
        Ok(place)
    }

    fn nearby_places(&self, query: &NearbyQuery) -> RepositoryResult<Vec<(Place, DistanceKm)>> {
        use crate::schema::places;

        let mut conn = self.conn()?;

        // Indexed bounding-box prefilter; the box over-approximates, so the
        // exact predicate below still applies.
        let bbox = query.origin.bounding_box(query.radius);
        let rows = places::table
            .filter(places::latitude.between(bbox.min_lat, bbox.max_lat))
            .filter(places::longitude.between(bbox.min_lon, bbox.max_lon))
            .load::<DbPlace>(&mut conn)?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let place: Place = row.try_into()?;
            let distance = query.origin.distance_km(&place.point);
            if distance.get() <= query.radius.get() {
                results.push((place, distance));
            }
        }

        results.sort_by(|(_, a), (_, b)| a.get().total_cmp(&b.get()));
        results.truncate(query.limit);

        Ok(results)
    }
}

impl PlaceWriter for DieselRepository {
    fn create_place_with_category(
        &self,
        place: &NewPlace,
        category_id: CategoryId,
    ) -> RepositoryResult<Place> {
        use crate::schema::{categories, place_category_reviews, places};

        let mut conn = self.conn()?;
        let db_place: DbNewPlace = place.clone().into();

        let created = conn.transaction::<DbPlace, RepositoryError, _>(|conn| {
            let category_exists = diesel::select(diesel::dsl::exists(
                categories::table.filter(categories::id.eq(category_id.get())),
            ))
            .get_result::<bool>(conn)?;
            if !category_exists {
                return Err(RepositoryError::MissingReference {
                    entity: "category",
                    id: category_id.get(),
                });
            }

            let created = diesel::insert_into(places::table)
                .values(db_place)
                .get_result::<DbPlace>(conn)?;

            diesel::insert_into(place_category_reviews::table)
                .values(DbNewReviewEvent {
                    place_id: created.id,
                    category_id: category_id.get(),
                    reviewed_at: None,
                    created_at: Utc::now().naive_utc(),
                })
                .execute(conn)?;

            Ok(created)
        })?;

        Ok(created.try_into()?)
    }
}
