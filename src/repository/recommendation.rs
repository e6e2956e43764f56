use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::category::Category;
use crate::domain::place::Place;
use crate::domain::recommendation::{
    ExplorationRecommendation, StaleCandidate, is_stale, rank,
};
use crate::models::category::Category as DbCategory;
use crate::models::place::Place as DbPlace;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, RecommendationQuery, RecommendationReader};

impl RecommendationReader for DieselRepository {
    fn stale_candidates(&self, expiration: Duration) -> RepositoryResult<Vec<StaleCandidate>> {
        use crate::schema::{categories, place_category_reviews, places};

        let mut conn = self.conn()?;
        let cutoff = Utc::now().naive_utc() - expiration;

        // Both reads run in one transaction so a single call sees one
        // snapshot of the ledger.
        let (latest_rows, pair_rows) = conn.transaction::<_, RepositoryError, _>(|conn| {
            let latest_rows: Vec<(i32, i32, Option<NaiveDateTime>)> = place_category_reviews::table
                .group_by((
                    place_category_reviews::place_id,
                    place_category_reviews::category_id,
                ))
                .select((
                    place_category_reviews::place_id,
                    place_category_reviews::category_id,
                    diesel::dsl::max(place_category_reviews::reviewed_at),
                ))
                .load(conn)?;

            let pair_rows: Vec<(DbPlace, DbCategory)> = place_category_reviews::table
                .inner_join(places::table)
                .inner_join(categories::table)
                .filter(categories::is_active.eq(true))
                .select((places::all_columns, categories::all_columns))
                .distinct()
                .load(conn)?;

            Ok((latest_rows, pair_rows))
        })?;

        let latest: HashMap<(i32, i32), Option<NaiveDateTime>> = latest_rows
            .into_iter()
            .map(|(place_id, category_id, reviewed_at)| ((place_id, category_id), reviewed_at))
            .collect();

        let mut candidates = Vec::new();
        for (db_place, db_category) in pair_rows {
            let last_reviewed_at = latest
                .get(&(db_place.id, db_category.id))
                .copied()
                .flatten();
            if !is_stale(last_reviewed_at, cutoff) {
                continue;
            }

            let place: Place = db_place.try_into()?;
            let category: Category = db_category.try_into()?;
            candidates.push(StaleCandidate {
                place,
                category,
                last_reviewed_at,
            });
        }

        Ok(candidates)
    }

    fn exploration_recommendations(
        &self,
        query: &RecommendationQuery,
    ) -> RepositoryResult<Vec<ExplorationRecommendation>> {
        let candidates = self
            .stale_candidates(query.expiration)?
            .into_iter()
            .map(|candidate| candidate.into_recommendation(query.origin.as_ref()))
            .collect();

        Ok(rank(candidates, query.limit, &mut rand::thread_rng()))
    }
}
