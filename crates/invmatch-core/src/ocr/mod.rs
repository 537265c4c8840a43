//! OCR acquisition backends.
//!
//! The engine consumes only a text blob; producing that blob is the job
//! of a backend selected once at configuration time. Backends are
//! strategies behind [`OcrBackend`] - no per-call capability probing.

mod fixture;
mod local;
mod vision;

pub use fixture::FixtureBackend;
pub use local::LocalOcrBackend;
pub use vision::CloudVisionBackend;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::OcrError;
use crate::models::{DebugOptions, OcrConfig};

/// One recognized paragraph with the backend's confidence for it.
/// Ignorable metadata as far as extraction is concerned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrParagraph {
    pub text: String,
    pub confidence: f32,
}

/// Unified OCR output returned by every backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrText {
    /// Concatenated recognized text, newline-delimited.
    pub text: String,

    /// Optional per-paragraph confidence annotations.
    #[serde(default)]
    pub paragraphs: Vec<OcrParagraph>,
}

impl OcrText {
    /// Wrap plain recognized text with no paragraph annotations.
    pub fn from_plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            paragraphs: Vec::new(),
        }
    }
}

/// Which backend to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Google Cloud Vision document text detection.
    CloudVision,
    /// A local tesseract executable.
    LocalOcr,
    /// Canned text, for tests and offline use.
    #[default]
    Fixture,
}

/// A text-recognition strategy.
#[async_trait::async_trait]
pub trait OcrBackend: Send + Sync {
    /// Backend name, for logging and debug dumps.
    fn name(&self) -> &str;

    /// Recognize text in an image.
    async fn recognize(&self, image: &[u8]) -> Result<OcrText, OcrError>;
}

/// Build the configured backend. Called once at process configuration
/// time; missing credentials or fixtures surface here, not per call.
pub fn create_backend(config: &OcrConfig) -> Result<Box<dyn OcrBackend>, OcrError> {
    match config.backend {
        BackendKind::CloudVision => {
            let api_key = std::env::var(&config.api_key_env).map_err(|_| {
                OcrError::Unavailable(format!("{} is not set", config.api_key_env))
            })?;
            Ok(Box::new(CloudVisionBackend::new(
                api_key,
                config.debug.clone(),
            )))
        }
        BackendKind::LocalOcr => Ok(Box::new(LocalOcrBackend::new(
            &config.tesseract_cmd,
            &config.language,
            config.debug.clone(),
        ))),
        BackendKind::Fixture => match &config.fixture_path {
            Some(path) => Ok(Box::new(FixtureBackend::from_file(path)?)),
            None => Ok(Box::new(FixtureBackend::sample())),
        },
    }
}

/// Persist a raw backend response when debugging is on. Dump failures are
/// logged and swallowed; they must not fail the recognition call.
pub(crate) fn dump_raw_response(debug: &DebugOptions, backend: &str, payload: &str) {
    if !debug.dump_raw {
        return;
    }

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let path = debug.dump_dir.join(format!("{backend}-{millis}.txt"));

    let result = std::fs::create_dir_all(&debug.dump_dir)
        .and_then(|_| std::fs::write(&path, payload));
    if let Err(e) = result {
        warn!("failed to persist raw OCR response to {}: {e}", path.display());
    }
}
