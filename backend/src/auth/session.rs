//! Server-side login sessions.
//!
//! A session is a random id handed to the browser in the `w2_session` cookie
//! and mapped here to the username that logged in. A user holds at most one
//! session: logging in again replaces the earlier one. Sessions otherwise
//! live until logout or process restart; the cookie itself lasts for the
//! browser session.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "w2_session";

#[derive(Clone, Default)]
pub struct SessionStore {
    /// Session id → username.
    sessions: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session for `username`, ending any earlier one, and returns its id.
    pub async fn create(&self, username: &str) -> String {
        let id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, owner| owner.as_str() != username);
        sessions.insert(id.clone(), username.to_string());
        id
    }

    pub async fn username(&self, session_id: &str) -> Option<String> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Ends a session, returning the username it belonged to.
    pub async fn remove(&self, session_id: &str) -> Option<String> {
        self.sessions.write().await.remove(session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

pub fn session_cookie(session_id: &str) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, session_id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Cookie that tells the browser to drop the session cookie.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .finish()
}
