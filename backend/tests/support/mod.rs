#![allow(dead_code)]

use actix_web::http::header;
use actix_web::test::TestRequest;
use async_trait::async_trait;
use backend::auth::SqliteUserStore;
use backend::config::{AppConfig, Variant};
use backend::extraction::{ExtractError, FieldExtractor};
use backend::AppState;
use image::{ImageBuffer, ImageFormat, Rgb};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const BOUNDARY: &str = "----w2-test-boundary";

pub enum StubReply {
    Text(String),
    Unavailable,
    /// The saved upload could not be read back.
    Unreadable,
}

/// Extractor that answers with a canned reply and records each call.
pub struct StubExtractor {
    reply: StubReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    saw_file: Mutex<Vec<bool>>,
}

impl StubExtractor {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            saw_file: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Whether the upload existed on disk when each call was made.
    pub fn saw_file(&self) -> Vec<bool> {
        self.saw_file.lock().unwrap().clone()
    }
}

#[async_trait]
impl FieldExtractor for StubExtractor {
    async fn extract(&self, image_path: &Path, prompt: &str) -> Result<String, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.saw_file.lock().unwrap().push(image_path.is_file());
        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::Unavailable => Err(ExtractError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            }),
            StubReply::Unreadable => Err(ExtractError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            ))),
        }
    }
}

pub struct TestContext {
    pub state: AppState,
    pub stub: Arc<StubExtractor>,
    pub dir: TempDir,
}

impl TestContext {
    pub fn new(variant: Variant, reply: StubReply) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path(), variant);
        let stub = Arc::new(StubExtractor::new(reply));
        let users = Arc::new(SqliteUserStore::new(&config.database_path).unwrap());
        let state = AppState::with_parts(config, stub.clone(), users).unwrap();
        Self { state, stub, dir }
    }

    pub fn with_text(variant: Variant, text: &str) -> Self {
        Self::new(variant, StubReply::Text(text.to_string()))
    }

    pub fn csv_path(&self) -> PathBuf {
        self.state.config.csv_path.clone()
    }

    pub fn csv_records(&self) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(self.csv_path())
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    pub fn upload_dir_entries(&self) -> usize {
        std::fs::read_dir(&self.state.config.upload_dir)
            .unwrap()
            .count()
    }
}

pub fn test_config(dir: &Path, variant: Variant) -> AppConfig {
    AppConfig {
        variant,
        host: "127.0.0.1".to_string(),
        port: 0,
        gemini_api_key: "test-key".to_string(),
        gemini_model: "gemini-1.5-flash".to_string(),
        gemini_base_url: "http://127.0.0.1:9/v1beta".to_string(),
        gemini_timeout_secs: 1,
        csv_path: dir.join("extracted_data.csv"),
        upload_dir: dir.join("uploads"),
        database_path: dir.join("w2db.sqlite"),
        allowed_origin: "http://localhost:5173".to_string(),
        max_upload_bytes: 1024 * 1024,
    }
}

/// A small white PNG standing in for a scanned W-2.
pub fn synthetic_png() -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(8, 8, Rgb([255, 255, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// One-part multipart body.
pub fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn image_body() -> Vec<u8> {
    multipart_body("image", "w2.png", "image/png", &synthetic_png())
}

pub fn multipart_post(uri: &str, body: Vec<u8>) -> TestRequest {
    TestRequest::post()
        .uri(uri)
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(body)
}
