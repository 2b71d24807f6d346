//! Process configuration, read once at start-up.
//!
//! Values come from the environment (optionally seeded from a `.env` file).
//! Every key can be given with the `W2_` prefix (`W2_PORT`, `W2_CSV_PATH`, ...).
//! The conventional `GEMINI_API_KEY` and `PORT` variables are honoured as
//! fallbacks so existing deployments keep working.

use config::{Config, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

const ENV_PREFIX: &str = "W2";

/// Which HTTP surface the server mounts. Both own `GET /`, so only one runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Single HTML page with an upload form, no accounts.
    Form,
    /// JSON API with signup/login and a session-protected `/extract`.
    Api,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub variant: Variant,
    pub host: String,
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout_secs: u64,
    pub csv_path: PathBuf,
    pub upload_dir: PathBuf,
    pub database_path: PathBuf,
    /// Browser origin allowed to call the API with credentials.
    pub allowed_origin: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    variant: Variant,
    host: String,
    port: u16,
    gemini_api_key: Option<String>,
    gemini_model: String,
    gemini_base_url: String,
    gemini_timeout_secs: u64,
    csv_path: PathBuf,
    upload_dir: PathBuf,
    database_path: PathBuf,
    allowed_origin: String,
    max_upload_bytes: usize,
}

impl AppConfig {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars().collect())
    }

    /// Builds the configuration from an explicit set of variables.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("variant", "api")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5000)?
            .set_default("gemini_model", "gemini-1.5-flash")?
            .set_default(
                "gemini_base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("gemini_timeout_secs", 120)?
            .set_default("csv_path", "extracted_data.csv")?
            .set_default("upload_dir", "static/uploads")?
            .set_default("database_path", "w2db.sqlite")?
            .set_default("allowed_origin", "http://localhost:5173")?
            .set_default("max_upload_bytes", 10 * 1024 * 1024)?;

        if let Some(key) = vars.get("GEMINI_API_KEY") {
            builder = builder.set_default("gemini_api_key", key.as_str())?;
        }
        if let Some(port) = vars.get("PORT") {
            builder = builder.set_default("port", port.as_str())?;
        }

        let raw: RawConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
            .build()?
            .try_deserialize()?;

        let gemini_api_key = raw
            .gemini_api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            variant: raw.variant,
            host: raw.host,
            port: raw.port,
            gemini_api_key,
            gemini_model: raw.gemini_model,
            gemini_base_url: raw.gemini_base_url,
            gemini_timeout_secs: raw.gemini_timeout_secs,
            csv_path: raw.csv_path,
            upload_dir: raw.upload_dir,
            database_path: raw.database_path,
            allowed_origin: raw.allowed_origin,
            max_upload_bytes: raw.max_upload_bytes,
        })
    }
}
