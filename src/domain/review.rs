use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, PlaceId, ReviewEventId};

/// One row of the append-only review ledger.
///
/// `reviewed_at = None` marks the bootstrap row written when a place is first
/// linked to a category; it always reads as "never reviewed", never as a
/// review at some sentinel instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub id: ReviewEventId,
    pub place_id: PlaceId,
    pub category_id: CategoryId,
    pub reviewed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// The (place, category) pair a ledger row belongs to.
pub type ReviewPair = (PlaceId, CategoryId);
