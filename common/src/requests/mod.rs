use serde::{Deserialize, Serialize};

/// Body of `POST /signup` and `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
