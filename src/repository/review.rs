use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{ReviewEvent, ReviewPair};
use crate::domain::types::{CategoryId, PlaceId};
use crate::models::review::{NewReviewEvent as DbNewReviewEvent, ReviewEvent as DbReviewEvent};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ReviewLedgerReader, ReviewLedgerWriter};

impl DieselRepository {
    /// Appends one ledger row after verifying both references.
    ///
    /// The existence checks and the insert share a transaction so a
    /// concurrently deleted parent cannot slip between them.
    fn append_review_event(
        &self,
        place_id: PlaceId,
        category_id: CategoryId,
        reviewed_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<ReviewEvent> {
        use crate::schema::{categories, place_category_reviews, places};

        let mut conn = self.conn()?;

        let created = conn.transaction::<DbReviewEvent, RepositoryError, _>(|conn| {
            let place_exists = diesel::select(diesel::dsl::exists(
                places::table.filter(places::id.eq(place_id.get())),
            ))
            .get_result::<bool>(conn)?;
            if !place_exists {
                return Err(RepositoryError::MissingReference {
                    entity: "place",
                    id: place_id.get(),
                });
            }

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

            let created = diesel::insert_into(place_category_reviews::table)
                .values(DbNewReviewEvent {
                    place_id: place_id.get(),
                    category_id: category_id.get(),
                    reviewed_at,
                    created_at: chrono::Utc::now().naive_utc(),
                })
                .get_result::<DbReviewEvent>(conn)?;

            Ok(created)
        })?;

        Ok(created.try_into()?)
    }
}

impl ReviewLedgerReader for DieselRepository {
    fn latest_review_per_pair(
        &self,
    ) -> RepositoryResult<HashMap<ReviewPair, Option<NaiveDateTime>>> {
        use crate::schema::place_category_reviews;

        let mut conn = self.conn()?;

        // MAX over a nullable column ignores nulls, so pairs that only have
        // bootstrap rows aggregate to None.
        let rows: Vec<(i32, i32, Option<NaiveDateTime>)> = place_category_reviews::table
            .group_by((
                place_category_reviews::place_id,
                place_category_reviews::category_id,
            ))
            .select((
                place_category_reviews::place_id,
                place_category_reviews::category_id,
                diesel::dsl::max(place_category_reviews::reviewed_at),
            ))
            .load(&mut conn)?;

        let mut latest = HashMap::with_capacity(rows.len());
        for (place_id, category_id, reviewed_at) in rows {
            let place_id = PlaceId::new(place_id).map_err(RepositoryError::from)?;
            let category_id = CategoryId::new(category_id).map_err(RepositoryError::from)?;
            latest.insert((place_id, category_id), reviewed_at);
        }

        Ok(latest)
    }
}

impl ReviewLedgerWriter for DieselRepository {
    fn record_review(
        &self,
        place_id: PlaceId,
        category_id: CategoryId,
        reviewed_at: NaiveDateTime,
    ) -> RepositoryResult<ReviewEvent> {
        self.append_review_event(place_id, category_id, Some(reviewed_at))
    }

    fn create_association(
        &self,
        place_id: PlaceId,
        category_id: CategoryId,
    ) -> RepositoryResult<ReviewEvent> {
        self.append_review_event(place_id, category_id, None)
    }
}
