use super::{AuthError, SESSION_COOKIE};
use crate::state::AppState;
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use log::warn;

/// A request that carries a live session.
///
/// Taking this as a handler argument protects the route: without a known
/// `w2_session` cookie the request fails with `401` and the handler body never
/// runs.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub session_id: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let session_id = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
        let path = req.path().to_string();

        Box::pin(async move {
            let (Some(state), Some(session_id)) = (state, session_id) else {
                warn!("Rejected unauthenticated request to {}", path);
                return Err(AuthError::Unauthorized);
            };
            match state.sessions.username(&session_id).await {
                Some(username) => Ok(AuthenticatedUser {
                    username,
                    session_id,
                }),
                None => {
                    warn!("Rejected unknown session on {}", path);
                    Err(AuthError::Unauthorized)
                }
            }
        })
    }
}
