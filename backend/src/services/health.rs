use actix_web::{web, HttpResponse, Responder};
use common::responses::MessageResponse;

pub const LIVENESS_MESSAGE: &str = "W-2 Extractor API is running";

pub async fn process() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse::new(LIVENESS_MESSAGE))
}

/// `GET /` liveness check for the API variant.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(process));
}
