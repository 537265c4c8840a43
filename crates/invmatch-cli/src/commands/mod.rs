//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use invmatch_core::{EngineConfig, InventoryItem, OcrText};

/// Load configuration, falling back to defaults when no path is given.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<EngineConfig> {
    match config_path {
        Some(path) => Ok(EngineConfig::from_file(Path::new(path))?),
        None => Ok(EngineConfig::default()),
    }
}

/// Load an inventory snapshot from a JSON file.
pub fn load_inventory(path: Option<&Path>) -> anyhow::Result<Vec<InventoryItem>> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }
        None => Ok(Vec::new()),
    }
}

/// Acquire OCR text for one input file. Text files are used as OCR output
/// directly; anything else goes through the configured backend.
pub async fn acquire_text(input: &Path, config: &EngineConfig) -> anyhow::Result<OcrText> {
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension == "txt" {
        let text = std::fs::read_to_string(input)?;
        return Ok(OcrText::from_plain(text));
    }

    let backend = invmatch_core::create_backend(&config.ocr)?;
    let image = std::fs::read(input)?;
    tracing::info!("recognizing {} via {}", input.display(), backend.name());
    Ok(backend.recognize(&image).await?)
}
