use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::auth::ApiKey;
use crate::forms::places::{
    CreatePlaceForm, CreatePlaceFormPayload, NearbyQueryParams, NearbyQueryPayload,
};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::places::{
    create_place as create_place_service, nearby_places as nearby_places_service,
};

#[post("/places")]
pub async fn create_place(
    _api_key: ApiKey,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreatePlaceForm>,
) -> impl Responder {
    let payload: CreatePlaceFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return HttpResponse::BadRequest().json(json!({ "error": e.to_string() })),
    };

    match create_place_service(payload, repo.get_ref()) {
        Ok(place) => HttpResponse::Created().json(place),
        Err(ServiceError::NotFound) => {
            HttpResponse::NotFound().json(json!({ "error": "category not found" }))
        }
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to create place: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/places/nearby")]
pub async fn nearby_places(
    params: web::Query<NearbyQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let payload: NearbyQueryPayload = match params.into_inner().try_into() {
        Ok(payload) => payload,
        Err(e) => return HttpResponse::BadRequest().json(json!({ "error": e.to_string() })),
    };

    match nearby_places_service(payload, repo.get_ref()) {
        Ok(places) => HttpResponse::Ok().json(places),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to run nearby search: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
