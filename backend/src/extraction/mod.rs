//! Field extraction: the call out to the multimodal model and the
//! upload → model → parse → store sequence built on top of it.

pub mod gemini;
pub mod pipeline;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

pub use gemini::GeminiClient;

/// Sends an image plus an instruction to a model and returns its raw reply.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    async fn extract(&self, image_path: &Path, prompt: &str) -> Result<String, ExtractError>;
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not read uploaded image: {0}")]
    Io(#[from] std::io::Error),
    #[error("uploaded file is not a decodable image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("request to the model API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model API returned no text")]
    EmptyResponse,
    #[error("extraction task failed: {0}")]
    Task(String),
}

impl ExtractError {
    /// True when the upload itself was at fault rather than the model service.
    pub fn is_bad_upload(&self) -> bool {
        matches!(self, ExtractError::ImageDecode(_))
    }

    /// True when this server failed on its own side, e.g. reading the saved upload.
    pub fn is_internal(&self) -> bool {
        matches!(self, ExtractError::Io(_) | ExtractError::Task(_))
    }
}
