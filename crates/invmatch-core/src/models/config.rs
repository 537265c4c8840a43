//! Configuration structures for the extraction and matching pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{InvmatchError, Result};
use crate::ocr::BackendKind;

/// Main configuration for the invmatch pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Line classifier configuration.
    pub classifier: ClassifierConfig,

    /// Header extraction configuration.
    pub header: HeaderConfig,

    /// Catalog matcher configuration.
    pub matcher: MatcherConfig,

    /// OCR acquisition configuration.
    pub ocr: OcrConfig,
}

/// Line classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum trimmed line length to consider at all.
    pub min_line_len: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { min_line_len: 3 }
    }
}

/// Header extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// How many leading lines to scan for vendor/invoice metadata.
    pub scan_lines: usize,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self { scan_lines: 10 }
    }
}

/// Catalog matcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Best score at or above this suggests updating the matched item.
    pub update_threshold: f32,

    /// Minimum acceptance floor. Scores below it resolve to add_new.
    /// The two generations of the source matcher disagreed (0.3 vs 0.5),
    /// so this stays a knob rather than a constant.
    pub review_floor: f32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            update_threshold: 0.7,
            review_floor: 0.4,
        }
    }
}

/// OCR acquisition configuration. Selected once at configuration time;
/// the engine itself never touches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Which backend to build.
    pub backend: BackendKind,

    /// Canned text file for the fixture backend (plain text, or JSON with
    /// per-paragraph confidences). Falls back to an embedded sample.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture_path: Option<PathBuf>,

    /// Environment variable holding the Cloud Vision API key.
    pub api_key_env: String,

    /// Executable for the local OCR backend.
    pub tesseract_cmd: String,

    /// Recognition language passed to the local backend.
    pub language: String,

    /// Raw-response debugging, passed explicitly per backend.
    pub debug: DebugOptions,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Fixture,
            fixture_path: None,
            api_key_env: "GOOGLE_VISION_API_KEY".to_string(),
            tesseract_cmd: "tesseract".to_string(),
            language: "eng".to_string(),
            debug: DebugOptions::default(),
        }
    }
}

/// Explicit debug switches for OCR acquisition. Replaces the process-wide
/// debug flag the original system toggled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugOptions {
    /// Persist raw backend responses to disk.
    pub dump_raw: bool,

    /// Directory for raw response dumps.
    pub dump_dir: PathBuf,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            dump_raw: false,
            dump_dir: PathBuf::from("ocr-debug"),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| InvmatchError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| InvmatchError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
