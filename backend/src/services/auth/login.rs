use crate::auth::password::verify_password;
use crate::auth::session::session_cookie;
use crate::auth::AuthError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::Credentials;
use common::responses::MessageResponse;
use log::{info, warn};

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<Credentials>,
) -> impl Responder {
    match login_user(&state, payload.into_inner()).await {
        Ok(session_id) => HttpResponse::Ok()
            .cookie(session_cookie(&session_id))
            .json(MessageResponse::new("Login successful")),
        Err(e) => e.error_response(),
    }
}

/// Checks the credentials and opens a session, returning its id.
pub async fn login_user(state: &AppState, credentials: Credentials) -> Result<String, AuthError> {
    let users = state.users.clone();
    let username = credentials.username.clone();
    let valid = web::block(move || -> Result<bool, AuthError> {
        Ok(users
            .find(&credentials.username)?
            .is_some_and(|user| verify_password(&credentials.password, &user.password_hash)))
    })
    .await
    .map_err(|e| AuthError::Task(e.to_string()))??;

    if !valid {
        warn!("Failed login for {}", username);
        return Err(AuthError::InvalidCredentials);
    }

    let session_id = state.sessions.create(&username).await;
    info!("User {} logged in", username);
    Ok(session_id)
}
