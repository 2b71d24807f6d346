use crate::auth::AuthenticatedUser;
use crate::extraction::pipeline::{extract_and_store, ExtractionOutcome};
use crate::extraction::ExtractError;
use crate::services::upload::{save_image_field, UploadError};
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::responses::{ErrorResponse, ExtractResponse, ParseFailureResponse};
use log::{error, info, warn};

pub const PARSE_FAILURE_MESSAGE: &str = "Could not parse response as valid JSON.";

pub async fn process(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    payload: Multipart,
) -> impl Responder {
    let upload = match save_image_field(
        payload,
        &state.config.upload_dir,
        state.config.max_upload_bytes,
    )
    .await
    {
        Ok(upload) => upload,
        Err(e) => return upload_error_response(e),
    };
    info!(
        "User {} uploaded {} ({} bytes)",
        user.username,
        upload.original_name.as_deref().unwrap_or("unnamed image"),
        upload.size
    );

    match extract_and_store(&state, upload.path()).await {
        Ok(ExtractionOutcome::Parsed { fields, .. }) => {
            HttpResponse::Ok().json(ExtractResponse {
                parsed_json: fields,
            })
        }
        Ok(ExtractionOutcome::Unparsed(failure)) => {
            HttpResponse::UnprocessableEntity().json(ParseFailureResponse {
                error: PARSE_FAILURE_MESSAGE.to_string(),
                raw_response: failure.raw,
            })
        }
        Err(e) => extract_error_response(e),
    }
}

fn upload_error_response(e: UploadError) -> HttpResponse {
    match e {
        UploadError::Io(_) => {
            error!("{}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
        _ => {
            warn!("Rejected upload: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
        }
    }
}

fn extract_error_response(e: ExtractError) -> HttpResponse {
    if e.is_bad_upload() {
        warn!("Rejected upload: {}", e);
        HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
    } else if e.is_internal() {
        error!("{}", e);
        HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
    } else {
        error!("Extraction failed: {}", e);
        HttpResponse::BadGateway().json(ErrorResponse::new(e.to_string()))
    }
}
