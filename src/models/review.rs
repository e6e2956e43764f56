use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::ReviewEvent as DomainReviewEvent;
use crate::domain::types::TypeConstraintError;

/// Diesel model representing one `place_category_reviews` ledger row.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::place_category_reviews)]
pub struct ReviewEvent {
    pub id: i32,
    pub place_id: i32,
    pub category_id: i32,
    pub reviewed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Insertable ledger row. Rows are only ever appended.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::place_category_reviews)]
pub struct NewReviewEvent {
    pub place_id: i32,
    pub category_id: i32,
    pub reviewed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<ReviewEvent> for DomainReviewEvent {
    type Error = TypeConstraintError;

    fn try_from(event: ReviewEvent) -> Result<Self, Self::Error> {
        Ok(Self {
            id: event.id.try_into()?,
            place_id: event.place_id.try_into()?,
            category_id: event.category_id.try_into()?,
            reviewed_at: event.reviewed_at,
            created_at: event.created_at,
        })
    }
}
