//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! conversions live here instead of next to the types they convert.

use crate::domain::types::TypeConstraintError;
use crate::forms::categories::CreateCategoryFormError;
use crate::forms::places::{CreatePlaceFormError, NearbyQueryError};
use crate::forms::recommendations::{ExploreQueryError, RecordReviewFormError};
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Validation(val.to_string())
    }
}

impl From<CreateCategoryFormError> for ServiceError {
    fn from(val: CreateCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<CreatePlaceFormError> for ServiceError {
    fn from(val: CreatePlaceFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<NearbyQueryError> for ServiceError {
    fn from(val: NearbyQueryError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<ExploreQueryError> for ServiceError {
    fn from(val: ExploreQueryError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<RecordReviewFormError> for ServiceError {
    fn from(val: RecordReviewFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
