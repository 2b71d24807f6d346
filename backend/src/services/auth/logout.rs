use crate::auth::session::expired_session_cookie;
use crate::auth::AuthenticatedUser;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::responses::MessageResponse;
use log::info;

pub async fn process(state: web::Data<AppState>, user: AuthenticatedUser) -> impl Responder {
    state.sessions.remove(&user.session_id).await;
    info!("User {} logged out", user.username);
    HttpResponse::Ok()
        .cookie(expired_session_cookie())
        .json(MessageResponse::new("Logged out"))
}
