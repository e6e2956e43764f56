//! API-key authentication for mutating endpoints.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpRequest, web};

use crate::models::config::ServerConfig;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Extractor that admits a request only when its `X-API-Key` header matches
/// the configured key. Add it as a handler argument to guard a route.
pub struct ApiKey;

/// Byte-wise comparison that does not short-circuit on the first mismatch.
/// The length of the configured key is not considered secret.
fn constant_time_eq(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut result = (a_bytes.len() ^ b_bytes.len()) as u8;
    for i in 0..a_bytes.len().min(b_bytes.len()) {
        result |= a_bytes[i] ^ b_bytes[i];
    }

    result == 0
}

impl FromRequest for ApiKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("ServerConfig is missing from application data");
            return ready(Err(ErrorInternalServerError("server misconfigured")));
        };

        let provided = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        match provided {
            Some(key) if constant_time_eq(key, &config.api_key) => ready(Ok(ApiKey)),
            Some(_) => ready(Err(ErrorUnauthorized("invalid API key"))),
            None => ready(Err(ErrorUnauthorized("missing X-API-Key header"))),
        }
    }
}
