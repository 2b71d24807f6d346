//! Reads the `image` part of a multipart upload into a per-request file.
//!
//! Each upload gets its own temporary file inside the configured upload
//! directory, so concurrent requests never overwrite each other's image.
//! The file is deleted when the returned [`SavedUpload`] is dropped.

use actix_multipart::{Multipart, MultipartError};
use futures_util::StreamExt;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No image uploaded")]
    Missing,
    #[error("Uploaded image is larger than {0} bytes")]
    TooLarge(usize),
    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Could not store upload: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct SavedUpload {
    file: NamedTempFile,
    pub original_name: Option<String>,
    pub size: usize,
}

impl SavedUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Streams the first non-empty `image` field to disk.
///
/// - Fields with other names are skipped.
/// - An absent or empty `image` field is [`UploadError::Missing`].
/// - More than `limit` bytes is [`UploadError::TooLarge`].
pub async fn save_image_field(
    mut payload: Multipart,
    upload_dir: &Path,
    limit: usize,
) -> Result<SavedUpload, UploadError> {
    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if name.as_deref() != Some(IMAGE_FIELD) {
            while let Some(chunk) = field.next().await {
                chunk?;
            }
            continue;
        }

        let original_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .filter(|f| !f.is_empty());
        let suffix = original_name
            .as_deref()
            .and_then(|f| Path::new(f).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();

        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile_in(upload_dir)?;
        let mut size = 0usize;
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            size += chunk.len();
            if size > limit {
                return Err(UploadError::TooLarge(limit));
            }
            file.write_all(&chunk)?;
        }

        if size == 0 {
            continue;
        }
        file.flush()?;
        return Ok(SavedUpload {
            file,
            original_name,
            size,
        });
    }

    Err(UploadError::Missing)
}
