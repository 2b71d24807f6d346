//! # W-2 Extraction Route
//!
//! `POST /extract` (API variant, session required) takes a multipart upload
//! with an `image` field and returns the fields the model read off the form.
//!
//! | Outcome                                | Status | Body                        |
//! |----------------------------------------|--------|-----------------------------|
//! | Fields parsed (saved to CSV or not)    | 200    | `{parsed_json}`             |
//! | No `image` part / not an image         | 400    | `{error}`                   |
//! | No session                             | 401    | `{error}`                   |
//! | Model reply not a JSON object          | 422    | `{error, raw_response}`     |
//! | Model service unreachable or failing   | 502    | `{error}`                   |

mod process;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/extract", web::post().to(process::process));
}
