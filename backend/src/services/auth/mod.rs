//! # Account Routes
//!
//! Signup, login and logout for the API variant. All three take and return
//! JSON.
//!
//! - `POST /signup`: `{username, password}` → `201 {message}`, or `409 {error}`
//!   when the username is taken. The stored record keeps only a salted hash.
//! - `POST /login`: `{username, password}` → `200 {message}` and a
//!   `w2_session` cookie, or `401 {error}` for an unknown user or a wrong
//!   password. No session is created on failure.
//! - `POST /logout`: requires a session → `200 {message}` and an expired
//!   cookie; `401 {error}` without one.

mod login;
mod logout;
mod signup;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup", web::post().to(signup::process))
        .route("/login", web::post().to(login::process))
        .route("/logout", web::post().to(logout::process));
}
