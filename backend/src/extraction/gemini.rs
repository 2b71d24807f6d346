//! Client for the Gemini `streamGenerateContent` endpoint.
//!
//! The image is decoded locally first so a corrupt upload fails fast with
//! [`ExtractError::ImageDecode`] instead of a vague upstream error. Formats
//! the API does not take inline are re-encoded as PNG. The streamed reply (a
//! JSON array of chunks) is read in full and the text of every chunk is
//! concatenated.

use super::{ExtractError, FieldExtractor};
use crate::config::AppConfig;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::ImageFormat;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ExtractError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.gemini_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl FieldExtractor for GeminiClient {
    async fn extract(&self, image_path: &Path, prompt: &str) -> Result<String, ExtractError> {
        let bytes = tokio::fs::read(image_path).await?;
        let inline_data = tokio::task::spawn_blocking(move || encode_image(&bytes))
            .await
            .map_err(|e| ExtractError::Task(e.to_string()))??;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData { inline_data },
                ],
            }],
        };

        debug!("Sending extraction request to model {}", self.model);
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Model API returned {}: {}", status, body);
            return Err(ExtractError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chunks: Vec<StreamChunk> = response.json().await?;
        let text = collect_text(&chunks);
        if text.is_empty() {
            return Err(ExtractError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Decodes the upload to make sure it is an image and wraps it for the API.
fn encode_image(bytes: &[u8]) -> Result<InlineData, ExtractError> {
    let format = image::guess_format(bytes)?;
    let decoded = image::load_from_memory_with_format(bytes, format)?;
    if matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP
    ) {
        return Ok(InlineData {
            mime_type: format.to_mime_type().to_string(),
            data: BASE64.encode(bytes),
        });
    }

    debug!("Re-encoding {:?} upload as PNG", format);
    let mut png = Cursor::new(Vec::new());
    decoded.write_to(&mut png, ImageFormat::Png)?;
    Ok(InlineData {
        mime_type: ImageFormat::Png.to_mime_type().to_string(),
        data: BASE64.encode(png.into_inner()),
    })
}

fn collect_text(chunks: &[StreamChunk]) -> String {
    chunks
        .iter()
        .filter_map(|chunk| chunk.candidates.first())
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.text.as_deref())
        .collect()
}
