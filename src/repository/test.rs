use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime, Utc};

use crate::domain::category::{Category, NewCategory};
use crate::domain::place::{NewPlace, Place};
use crate::domain::recommendation::{
    ExplorationRecommendation, StaleCandidate, is_stale, rank,
};
use crate::domain::review::{ReviewEvent, ReviewPair};
use crate::domain::types::{CategoryId, CategoryName, DistanceKm, PlaceId, ReviewEventId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, NearbyQuery, PlaceReader, PlaceWriter,
    RecommendationQuery, RecommendationReader, ReviewLedgerReader, ReviewLedgerWriter,
};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    categories: Vec<Category>,
    places: Vec<Place>,
    reviews: Vec<ReviewEvent>,
}

impl TestRepository {
    pub fn new(categories: Vec<Category>, places: Vec<Place>, reviews: Vec<ReviewEvent>) -> Self {
        Self {
            categories,
            places,
            reviews,
        }
    }

    fn pairs(&self) -> Vec<ReviewPair> {
        let mut pairs: Vec<ReviewPair> = self
            .reviews
            .iter()
            .map(|event| (event.place_id, event.category_id))
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        let mut items: Vec<Category> = self
            .categories
            .iter()
            .filter(|category| !query.active_only || category.is_active)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        let total = items.len();

        if let Some(pagination) = &query.pagination {
            let offset = (pagination.page.max(1) - 1) * pagination.per_page;
            items = items
                .into_iter()
                .skip(offset)
                .take(pagination.per_page)
                .collect();
        }

        Ok((total, items))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .iter()
            .find(|category| category.id == id)
            .cloned())
    }

    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .iter()
            .find(|category| category.name == *name && category.is_active)
            .cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        Ok(Category {
            id: CategoryId::new(self.categories.len() as i32 + 1).expect("positive id"),
            name: category.name.clone(),
            description: category.description.clone(),
            is_active: category.is_active,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }

    fn set_category_active(&self, id: CategoryId, _is_active: bool) -> RepositoryResult<usize> {
        Ok(self
            .categories
            .iter()
            .filter(|category| category.id == id)
            .count())
    }
}

impl PlaceReader for TestRepository {
    fn get_place_by_id(&self, id: PlaceId) -> RepositoryResult<Option<Place>> {
        Ok(self.places.iter().find(|place| place.id == id).cloned())
    }

    fn nearby_places(&self, query: &NearbyQuery) -> RepositoryResult<Vec<(Place, DistanceKm)>> {
        let mut results: Vec<(Place, DistanceKm)> = self
            .places
            .iter()
            .map(|place| (place.clone(), query.origin.distance_km(&place.point)))
            .filter(|(_, distance)| distance.get() <= query.radius.get())
            .collect();
        results.sort_by(|(_, a), (_, b)| a.get().total_cmp(&b.get()));
        results.truncate(query.limit);
        Ok(results)
    }
}

impl PlaceWriter for TestRepository {
    fn create_place_with_category(
        &self,
        place: &NewPlace,
        category_id: CategoryId,
    ) -> RepositoryResult<Place> {
        if !self
            .categories
            .iter()
            .any(|category| category.id == category_id)
        {
            return Err(RepositoryError::MissingReference {
                entity: "category",
                id: category_id.get(),
            });
        }

        Ok(Place {
            id: PlaceId::new(self.places.len() as i32 + 1).expect("positive id"),
            name: place.name.clone(),
            description: place.description.clone(),
            point: place.point,
            created_at: place.created_at,
            updated_at: place.updated_at,
        })
    }
}

impl ReviewLedgerReader for TestRepository {
    fn latest_review_per_pair(
        &self,
    ) -> RepositoryResult<HashMap<ReviewPair, Option<NaiveDateTime>>> {
        let mut latest: HashMap<ReviewPair, Option<NaiveDateTime>> = HashMap::new();
        for event in &self.reviews {
            let entry = latest
                .entry((event.place_id, event.category_id))
                .or_insert(None);
            if let Some(reviewed_at) = event.reviewed_at {
                *entry = Some(entry.map_or(reviewed_at, |current| current.max(reviewed_at)));
            }
        }
        Ok(latest)
    }
}

impl ReviewLedgerWriter for TestRepository {
    fn record_review(
        &self,
        place_id: PlaceId,
        category_id: CategoryId,
        reviewed_at: NaiveDateTime,
    ) -> RepositoryResult<ReviewEvent> {
        if !self.places.iter().any(|place| place.id == place_id) {
            return Err(RepositoryError::MissingReference {
                entity: "place",
                id: place_id.get(),
            });
        }
        if !self
            .categories
            .iter()
            .any(|category| category.id == category_id)
        {
            return Err(RepositoryError::MissingReference {
                entity: "category",
                id: category_id.get(),
            });
        }

        Ok(ReviewEvent {
            id: ReviewEventId::new(self.reviews.len() as i32 + 1).expect("positive id"),
            place_id,
            category_id,
            reviewed_at: Some(reviewed_at),
            created_at: Utc::now().naive_utc(),
        })
    }

    fn create_association(
        &self,
        place_id: PlaceId,
        category_id: CategoryId,
    ) -> RepositoryResult<ReviewEvent> {
        if !self.places.iter().any(|place| place.id == place_id) {
            return Err(RepositoryError::MissingReference {
                entity: "place",
                id: place_id.get(),
            });
        }
        if !self
            .categories
            .iter()
            .any(|category| category.id == category_id)
        {
            return Err(RepositoryError::MissingReference {
                entity: "category",
                id: category_id.get(),
            });
        }

        Ok(ReviewEvent {
            id: ReviewEventId::new(self.reviews.len() as i32 + 1).expect("positive id"),
            place_id,
            category_id,
            reviewed_at: None,
            created_at: Utc::now().naive_utc(),
        })
    }
}

impl RecommendationReader for TestRepository {
    fn stale_candidates(&self, expiration: Duration) -> RepositoryResult<Vec<StaleCandidate>> {
        let cutoff = Utc::now().naive_utc() - expiration;
        let latest = self.latest_review_per_pair()?;

        let mut candidates = Vec::new();
        for (place_id, category_id) in self.pairs() {
            let Some(category) = self
                .categories
                .iter()
                .find(|category| category.id == category_id && category.is_active)
            else {
                continue;
            };
            let Some(place) = self.places.iter().find(|place| place.id == place_id) else {
                continue;
            };

            let last_reviewed_at = latest.get(&(place_id, category_id)).copied().flatten();
            if !is_stale(last_reviewed_at, cutoff) {
                continue;
            }

            candidates.push(StaleCandidate {
                place: place.clone(),
                category: category.clone(),
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
