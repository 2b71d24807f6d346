//! W-2 extraction server.
//!
//! Accepts an image of a W-2 form, asks a multimodal model to read its
//! fields, parses the reply into JSON and appends it to a CSV history.
//! Two HTTP surfaces are available, picked by [`config::Variant`]:
//! an HTML upload page, or a JSON API guarded by username/password sessions.

pub mod auth;
pub mod config;
pub mod extraction;
pub mod persistence;
pub mod services;
pub mod state;

pub use state::AppState;

use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};
use common::responses::ErrorResponse;
use crate::config::Variant;

const JSON_BODY_LIMIT: usize = 64 * 1024;

/// Registers the routes of the JSON API variant.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(|err, _req| {
                let body = ErrorResponse::new(err.to_string());
                InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
            }),
    );
    services::health::configure_routes(cfg);
    services::auth::configure_routes(cfg);
    services::extract::configure_routes(cfg);
}

/// Registers the routes of the HTML upload page variant.
pub fn configure_form(cfg: &mut web::ServiceConfig) {
    services::form::configure_routes(cfg);
}

pub fn configure_variant(variant: Variant) -> fn(&mut web::ServiceConfig) {
    match variant {
        Variant::Api => configure_api,
        Variant::Form => configure_form,
    }
}
