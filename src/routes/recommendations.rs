use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::auth::ApiKey;
use crate::forms::recommendations::{
    ExploreQueryParams, ExploreQueryPayload, RecordReviewForm, RecordReviewFormPayload,
};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::recommendations::{
    get_exploration_recommendations as explore_service, record_review as record_review_service,
};

#[get("/recommendations/explore")]
pub async fn explore(
    params: web::Query<ExploreQueryParams>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let payload: ExploreQueryPayload = match params.into_inner().try_into() {
        Ok(payload) => payload,
        Err(e) => return HttpResponse::BadRequest().json(json!({ "error": e.to_string() })),
    };

    match explore_service(payload, config.review_expiration_days, repo.get_ref()) {
        Ok(recommendations) => HttpResponse::Ok().json(recommendations),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to compute recommendations: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/reviews")]
pub async fn record_review(
    _api_key: ApiKey,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RecordReviewForm>,
) -> impl Responder {
    let payload: RecordReviewFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return HttpResponse::BadRequest().json(json!({ "error": e.to_string() })),
    };

    match record_review_service(payload, repo.get_ref()) {
        Ok(event) => HttpResponse::Created().json(event),
        Err(ServiceError::NotFound) => {
            HttpResponse::NotFound().json(json!({ "error": "place or category not found" }))
        }
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to record review: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
