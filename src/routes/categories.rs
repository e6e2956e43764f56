use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::auth::ApiKey;
use crate::forms::categories::{
    CategoryStatusForm, CreateCategoryForm, CreateCategoryFormPayload, ListCategoriesParams,
};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::categories::{
    create_category as create_category_service, list_categories as list_categories_service,
    set_category_status as set_category_status_service,
};

#[post("/categories")]
pub async fn create_category(
    _api_key: ApiKey,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateCategoryForm>,
) -> impl Responder {
    let payload: CreateCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return HttpResponse::BadRequest().json(json!({ "error": e.to_string() })),
    };

    match create_category_service(payload, repo.get_ref()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to create category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/categories")]
pub async fn list_categories(
    params: web::Query<ListCategoriesParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_categories_service(params.into_inner(), repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to list categories: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/categories/{category_id}/status")]
pub async fn set_category_status(
    _api_key: ApiKey,
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryStatusForm>,
) -> impl Responder {
    let category_id = match category_id.into_inner().try_into() {
        Ok(id) => id,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({ "error": format!("invalid category id: {e}") }));
        }
    };

    match set_category_status_service(category_id, form.is_active, repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to update category status: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
