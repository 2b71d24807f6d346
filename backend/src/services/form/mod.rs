//! # Upload Page
//!
//! The form variant: a single page at `/` with no accounts.
//!
//! - `GET /` renders the upload form.
//! - `POST /` takes a multipart `image` field, runs the extraction inside the
//!   request and renders the same page with the parsed fields, or with the
//!   raw model text when it could not be parsed.
//! - Anything else is looked up in the embedded `assets/` directory.

mod page;

use crate::extraction::pipeline::{extract_and_store, ExtractionOutcome};
use crate::services::upload::{save_image_field, UploadError};
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use log::{error, warn};
use mime_guess::from_path;

pub use page::{render_page, PageView};

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets");

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(index))
            .route(web::post().to(submit)),
    )
    .route("/{path:.*}", web::get().to(serve_embedded));
}

async fn index() -> HttpResponse {
    html_response(StatusCode::OK, &PageView::Empty)
}

async fn submit(state: web::Data<AppState>, payload: Multipart) -> HttpResponse {
    let upload = match save_image_field(
        payload,
        &state.config.upload_dir,
        state.config.max_upload_bytes,
    )
    .await
    {
        Ok(upload) => upload,
        Err(e) => {
            warn!("Rejected upload: {}", e);
            let status = match e {
                UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            };
            return html_response(status, &PageView::Failed { message: &e.to_string() });
        }
    };

    match extract_and_store(&state, upload.path()).await {
        Ok(ExtractionOutcome::Parsed { fields, raw, saved }) => html_response(
            StatusCode::OK,
            &PageView::Parsed {
                fields: &fields,
                raw: &raw,
                saved,
            },
        ),
        Ok(ExtractionOutcome::Unparsed(failure)) => {
            html_response(StatusCode::OK, &PageView::Unparsed { raw: &failure.raw })
        }
        Err(e) => {
            let status = if e.is_bad_upload() {
                StatusCode::BAD_REQUEST
            } else if e.is_internal() {
                error!("{}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                error!("Extraction failed: {}", e);
                StatusCode::BAD_GATEWAY
            };
            html_response(status, &PageView::Failed { message: &e.to_string() })
        }
    }
}

fn html_response(status: StatusCode, view: &PageView) -> HttpResponse {
    match render_page(view) {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            error!("Could not render page: {}", e);
            HttpResponse::InternalServerError().body("Could not render page")
        }
    }
}

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    match STATIC_DIR.get_file(path) {
        Some(file) if path != "index.html" => {
            let mime = from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        _ => HttpResponse::NotFound().body("Not Found"),
    }
}
