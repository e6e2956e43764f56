use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::geo::GeoPoint;
use crate::domain::place::{NewPlace, Place};
use crate::domain::recommendation::{ExplorationRecommendation, StaleCandidate};
use crate::domain::review::{ReviewEvent, ReviewPair};
use crate::domain::types::{CategoryId, CategoryName, DistanceKm, PlaceId, RadiusKm};
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod errors;
pub mod place;
pub mod recommendation;
pub mod review;
#[cfg(test)]
pub mod test;

/// Items per page when a listing request does not specify one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 25;

/// Page/size pair for offset pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Restrict to categories with `is_active = true`.
    pub active_only: bool,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    /// Listing of active categories only (the recommendation-facing view).
    pub fn active() -> Self {
        Self {
            active_only: true,
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Parameters for a radius search around an origin point.
#[derive(Debug, Clone)]
pub struct NearbyQuery {
    pub origin: GeoPoint,
    pub radius: RadiusKm,
    pub limit: usize,
}

impl NearbyQuery {
    pub fn new(origin: GeoPoint, radius: RadiusKm, limit: usize) -> Self {
        Self {
            origin,
            radius,
            limit,
        }
    }
}

/// Parameters for one exploration-recommendation call.
#[derive(Debug, Clone)]
pub struct RecommendationQuery {
    /// Maximum number of records returned.
    pub limit: usize,
    /// Requester position; when present, proximity dominates the ordering.
    pub origin: Option<GeoPoint>,
    /// Process-wide review expiration window.
    pub expiration: Duration,
}

impl RecommendationQuery {
    pub fn new(expiration: Duration) -> Self {
        Self {
            limit: 10,
            origin: None,
            expiration,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn origin(mut self, origin: Option<GeoPoint>) -> Self {
        self.origin = origin;
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories using the supplied query options.
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Retrieve an active category by its unique name.
    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return it.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Flip the soft-disable switch. Returns the number of affected rows.
    fn set_category_active(&self, id: CategoryId, is_active: bool) -> RepositoryResult<usize>;
}

/// Read-only operations for place entities.
pub trait PlaceReader {
    /// Retrieve a place by its identifier.
    fn get_place_by_id(&self, id: PlaceId) -> RepositoryResult<Option<Place>>;
    /// Places within the query radius, paired with their exact distance and
    /// ordered by ascending distance.
    fn nearby_places(&self, query: &NearbyQuery) -> RepositoryResult<Vec<(Place, DistanceKm)>>;
}

/// Write operations for place entities.
pub trait PlaceWriter {
    /// Insert a place and its bootstrap category association as one unit of
    /// work; neither persists if the other fails.
    fn create_place_with_category(
        &self,
        place: &NewPlace,
        category_id: CategoryId,
    ) -> RepositoryResult<Place>;
}

/// Read-side aggregation over the append-only review ledger.
pub trait ReviewLedgerReader {
    /// Latest non-null review timestamp per (place, category) pair,
    /// recomputed from the full event set. Pairs whose rows are all null map
    /// to `None`.
    fn latest_review_per_pair(&self)
    -> RepositoryResult<HashMap<ReviewPair, Option<NaiveDateTime>>>;
}

/// Append operations on the review ledger. Rows are never updated.
pub trait ReviewLedgerWriter {
    /// Append a review at `reviewed_at` for an existing (place, category)
    /// pair.
    fn record_review(
        &self,
        place_id: PlaceId,
        category_id: CategoryId,
        reviewed_at: NaiveDateTime,
    ) -> RepositoryResult<ReviewEvent>;
    /// Append the bootstrap association row (`reviewed_at = NULL`). Not
    /// idempotent: repeated calls append further rows.
    fn create_association(
        &self,
        place_id: PlaceId,
        category_id: CategoryId,
    ) -> RepositoryResult<ReviewEvent>;
}

/// Staleness evaluation and the composite ranking query.
pub trait RecommendationReader {
    /// Pairs eligible for re-exploration: category active AND (never
    /// reviewed OR latest review strictly older than `now - expiration`).
    fn stale_candidates(&self, expiration: Duration) -> RepositoryResult<Vec<StaleCandidate>>;
    /// Ranked, size-bounded recommendation list. Failures surface as errors;
    /// an empty list always means "no stale candidates".
    fn exploration_recommendations(
        &self,
        query: &RecommendationQuery,
    ) -> RepositoryResult<Vec<ExplorationRecommendation>>;
}
