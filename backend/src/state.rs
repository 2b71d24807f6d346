//! Shared application state.
//!
//! `AppState` is built once in `main.rs` from the [`AppConfig`] and injected
//! into every worker as `web::Data<AppState>`. Handlers reach the model
//! client, the user store, the session map and the CSV history through it
//! instead of through process-wide globals.

use crate::auth::{SessionStore, SqliteUserStore, UserStore};
use crate::config::AppConfig;
use crate::extraction::{ExtractError, FieldExtractor, GeminiClient};
use crate::persistence::CsvStore;
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Model client. Swapped for a stub in tests.
    pub extractor: Arc<dyn FieldExtractor>,
    pub users: Arc<dyn UserStore>,
    pub sessions: SessionStore,
    pub csv: CsvStore,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot create upload directory: {0}")]
    UploadDir(#[from] std::io::Error),
    #[error("cannot open user store: {0}")]
    UserStore(#[from] crate::auth::AuthError),
    #[error("cannot build model client: {0}")]
    Extractor(#[from] ExtractError),
}

impl AppState {
    /// Production wiring: Gemini client and the SQLite user store.
    pub fn from_config(config: AppConfig) -> Result<Self, StartupError> {
        let extractor = Arc::new(GeminiClient::new(&config)?);
        let users = Arc::new(SqliteUserStore::new(&config.database_path)?);
        Self::with_parts(config, extractor, users)
    }

    /// Wires the state around an arbitrary extractor and user store.
    pub fn with_parts(
        config: AppConfig,
        extractor: Arc<dyn FieldExtractor>,
        users: Arc<dyn UserStore>,
    ) -> Result<Self, StartupError> {
        std::fs::create_dir_all(&config.upload_dir)?;
        Ok(Self {
            csv: CsvStore::new(config.csv_path.clone()),
            config: Arc::new(config),
            extractor,
            users,
            sessions: SessionStore::new(),
        })
    }
}
