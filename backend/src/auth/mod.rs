//! Accounts and sessions for the API variant.
//!
//! - `users`: persistent user records behind the [`UserStore`] trait.
//! - `password`: salted password hashing and verification.
//! - `session`: in-memory map of session ids to usernames.
//! - `guard`: the [`AuthenticatedUser`] extractor that protects routes.

pub mod guard;
pub mod password;
pub mod session;
pub mod users;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::ErrorResponse;
use thiserror::Error;

pub use guard::AuthenticatedUser;
pub use session::{SessionStore, SESSION_COOKIE};
pub use users::{SqliteUserStore, UserRecord, UserStore};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User already exists")]
    UserExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("user store error: {0}")]
    Store(#[from] rusqlite::Error),
    #[error("user store task failed: {0}")]
    Task(String),
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserExists => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Store(_) | AuthError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AuthError::Store(_) | AuthError::Task(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(message))
    }
}
