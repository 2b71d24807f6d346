use crate::auth::password::hash_password;
use crate::auth::{AuthError, UserRecord};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::Credentials;
use common::responses::MessageResponse;
use log::{info, warn};

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<Credentials>,
) -> impl Responder {
    match signup_user(&state, payload.into_inner()).await {
        Ok(()) => HttpResponse::Created().json(MessageResponse::new("Signup successful")),
        Err(e) => e.error_response(),
    }
}

/// Creates a user with a hashed password.
///
/// An existing username yields [`AuthError::UserExists`] and leaves the stored
/// record as it was.
pub async fn signup_user(state: &AppState, credentials: Credentials) -> Result<(), AuthError> {
    let users = state.users.clone();
    let username = credentials.username.clone();
    let result = web::block(move || {
        if users.find(&credentials.username)?.is_some() {
            return Err(AuthError::UserExists);
        }
        users.insert(&UserRecord {
            password_hash: hash_password(&credentials.password),
            username: credentials.username,
        })
    })
    .await
    .map_err(|e| AuthError::Task(e.to_string()))?;

    match &result {
        Ok(()) => info!("Created user {}", username),
        Err(AuthError::UserExists) => warn!("Signup for existing user {}", username),
        Err(_) => {}
    }
    result
}
