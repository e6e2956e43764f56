use chrono::{Duration, Utc};

use crate::dto::recommendations::{ExplorationRecommendationDto, ReviewEventDto};
use crate::forms::recommendations::{ExploreQueryPayload, RecordReviewFormPayload};
use crate::repository::errors::RepositoryError;
use crate::repository::{RecommendationQuery, RecommendationReader, ReviewLedgerWriter};
use crate::services::{ServiceError, ServiceResult};

/// Runs the composite ranking query.
///
/// `expiration_days` comes from process configuration, never from the
/// request. A failure is surfaced as an error so an empty list always means
/// "no stale candidates".
pub fn get_exploration_recommendations<R>(
    payload: ExploreQueryPayload,
    expiration_days: i64,
    repo: &R,
) -> ServiceResult<Vec<ExplorationRecommendationDto>>
where
    R: RecommendationReader,
{
    let query = RecommendationQuery::new(Duration::days(expiration_days))
        .limit(payload.limit)
        .origin(payload.origin);

    match repo.exploration_recommendations(&query) {
        Ok(recommendations) => Ok(recommendations
            .into_iter()
            .map(ExplorationRecommendationDto::from)
            .collect()),
        Err(e) => {
            log::error!("Failed to compute exploration recommendations: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Appends a review for the pair, stamped with the current instant.
pub fn record_review<R>(payload: RecordReviewFormPayload, repo: &R) -> ServiceResult<ReviewEventDto>
where
    R: ReviewLedgerWriter,
{
    match repo.record_review(
        payload.place_id,
        payload.category_id,
        Utc::now().naive_utc(),
    ) {
        Ok(event) => Ok(ReviewEventDto::from(event)),
        Err(RepositoryError::MissingReference { .. }) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to record review: {e}");
            Err(ServiceError::Internal)
        }
    }
}
