use diesel::result::DatabaseErrorKind;

use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{CreateCategoryFormPayload, ListCategoriesParams};
use crate::repository::errors::RepositoryError;
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter, DEFAULT_ITEMS_PER_PAGE};
use crate::services::{ServiceError, ServiceResult};

pub fn create_category<R>(payload: CreateCategoryFormPayload, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    let category = payload.into_new_category();
    match repo.create_category(&category) {
        Ok(created) => Ok(CategoryDto::from(created)),
        Err(RepositoryError::Query(diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            _,
        ))) => Err(ServiceError::Form(format!(
            "category name '{}' is already taken",
            category.name
        ))),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_categories<R>(params: ListCategoriesParams, repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    let mut query = CategoryListQuery::active();
    if let Some(page) = params.page {
        query = query.paginate(page.max(1) as usize, DEFAULT_ITEMS_PER_PAGE);
    }

    match repo.list_categories(query) {
        Ok((_total, categories)) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn set_category_status<R>(
    category_id: CategoryId,
    is_active: bool,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter,
{
    match repo.set_category_active(category_id, is_active) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to update category status: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(CategoryDto::from(category)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to reload category: {e}");
            Err(ServiceError::Internal)
        }
    }
}
