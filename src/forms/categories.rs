use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryName, TypeConstraintError};

/// Body of `POST /v1/categories`.
#[derive(Deserialize, Validate)]
pub struct CreateCategoryForm {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(max = 200))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategoryFormPayload {
    pub name: CategoryName,
    pub description: Option<String>,
    pub is_active: bool,
}

impl CreateCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name: self.name,
            description: self.description,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateCategoryFormError {
    #[error("Create category form validation failed: {0}")]
    Validation(String),
    #[error("Create category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreateCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateCategoryForm> for CreateCategoryFormPayload {
    type Error = CreateCategoryFormError;

    fn try_from(value: CreateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: CategoryName::new(value.name)?,
            description: value.description,
            is_active: value.is_active.unwrap_or(true),
        })
    }
}

/// Query string of `GET /v1/categories`.
#[derive(Deserialize, Validate, Debug)]
pub struct ListCategoriesParams {
    #[validate(range(min = 1))]
    pub page: Option<i64>,
}

/// Body of `POST /v1/categories/{category_id}/status`.
#[derive(Deserialize, Debug)]
pub struct CategoryStatusForm {
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_active() {
        let form = CreateCategoryForm {
            name: "Food".to_string(),
            description: None,
            is_active: None,
        };

        let payload: CreateCategoryFormPayload = form.try_into().unwrap();
        assert!(payload.is_active);
        assert_eq!(payload.name.as_str(), "Food");
    }

    #[test]
    fn trims_category_names() {
        let form = CreateCategoryForm {
            name: "  Museums  ".to_string(),
            description: Some("Galleries and exhibitions".to_string()),
            is_active: Some(false),
        };

        let payload: CreateCategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.name.as_str(), "Museums");
        assert!(!payload.is_active);
    }

    #[test]
    fn rejects_whitespace_only_names() {
        let form = CreateCategoryForm {
            name: "  ".to_string(),
            description: None,
            is_active: None,
        };

        let payload: Result<CreateCategoryFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }
}
