//! Local OCR backend - shells out to a tesseract executable.

use tokio::process::Command;
use tracing::{debug, info};

use super::{dump_raw_response, OcrBackend, OcrText};
use crate::error::OcrError;
use crate::models::DebugOptions;

/// Runs `tesseract <image> stdout -l <lang>` on a staged temp file.
pub struct LocalOcrBackend {
    cmd: String,
    language: String,
    debug: DebugOptions,
}

impl LocalOcrBackend {
    pub fn new(cmd: &str, language: &str, debug: DebugOptions) -> Self {
        Self {
            cmd: cmd.to_string(),
            language: language.to_string(),
            debug,
        }
    }
}

#[async_trait::async_trait]
impl OcrBackend for LocalOcrBackend {
    fn name(&self) -> &str {
        "local-ocr"
    }

    async fn recognize(&self, image: &[u8]) -> Result<OcrText, OcrError> {
        if image.is_empty() {
            return Err(OcrError::InvalidImage("empty image payload".to_string()));
        }

        // tesseract reads from a path, so stage the bytes in a temp file
        // that lives for the duration of the call.
        let staged = tempfile::Builder::new()
            .prefix("invmatch-ocr-")
            .suffix(".img")
            .tempfile()?;
        std::fs::write(staged.path(), image)?;

        info!("local-ocr: running {} on {} bytes", self.cmd, image.len());

        let output = Command::new(&self.cmd)
            .arg(staged.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .await
            .map_err(|e| OcrError::Unavailable(format!("failed to launch {}: {e}", self.cmd)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Backend(format!(
                "{} exited with {}: {}",
                self.cmd,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        dump_raw_response(&self.debug, self.name(), &text);
        debug!("local-ocr: recognized {} characters", text.len());

        Ok(OcrText::from_plain(text))
    }
}
