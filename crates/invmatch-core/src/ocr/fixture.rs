//! Fixture backend - canned text instead of real recognition.

use std::path::Path;

use tracing::debug;

use super::{OcrBackend, OcrText};
use crate::error::OcrError;

/// Sample invoice used when no fixture file is configured.
const SAMPLE_INVOICE: &str = "\
Fresh Farms Ltd
Invoice #INV-2024-001

Tomatoes 5 kg $12.99
Chicken 2 kg $18.99
Rice 10 kg $24.00

Subtotal: $55.98
Thank you for your business!";

/// Returns canned text regardless of the image. The offline fallback and
/// the test seam for everything downstream of recognition.
pub struct FixtureBackend {
    canned: OcrText,
}

impl FixtureBackend {
    pub fn new(canned: OcrText) -> Self {
        Self { canned }
    }

    pub fn from_plain(text: impl Into<String>) -> Self {
        Self::new(OcrText::from_plain(text))
    }

    /// Load a fixture file: JSON `OcrText` (with paragraph annotations)
    /// when it parses as such, plain text otherwise.
    pub fn from_file(path: &Path) -> Result<Self, OcrError> {
        let content = std::fs::read_to_string(path)?;
        let canned = match serde_json::from_str::<OcrText>(&content) {
            Ok(parsed) => parsed,
            Err(_) => OcrText::from_plain(content),
        };
        debug!("loaded OCR fixture from {}", path.display());
        Ok(Self::new(canned))
    }

    /// The embedded sample invoice.
    pub fn sample() -> Self {
        Self::from_plain(SAMPLE_INVOICE)
    }
}

#[async_trait::async_trait]
impl OcrBackend for FixtureBackend {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn recognize(&self, _image: &[u8]) -> Result<OcrText, OcrError> {
        Ok(self.canned.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn returns_the_canned_text() {
        let backend = FixtureBackend::from_plain("Tomatoes 5 kg");
        let out = backend.recognize(&[]).await.unwrap();
        assert_eq!(out.text, "Tomatoes 5 kg");
        assert!(out.paragraphs.is_empty());
    }

    #[tokio::test]
    async fn json_fixture_carries_paragraph_annotations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.json");
        std::fs::write(
            &path,
            r#"{"text":"Rice 3 kg","paragraphs":[{"text":"Rice 3 kg","confidence":0.92}]}"#,
        )
        .unwrap();

        let backend = FixtureBackend::from_file(&path).unwrap();
        let out = backend.recognize(&[]).await.unwrap();
        assert_eq!(out.text, "Rice 3 kg");
        assert_eq!(out.paragraphs.len(), 1);
        assert_eq!(out.paragraphs[0].confidence, 0.92);
    }

    #[tokio::test]
    async fn plain_text_fixture_has_no_annotations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.txt");
        std::fs::write(&path, "Chicken 2 kg\n").unwrap();

        let backend = FixtureBackend::from_file(&path).unwrap();
        let out = backend.recognize(b"ignored").await.unwrap();
        assert_eq!(out.text, "Chicken 2 kg\n");
        assert!(out.paragraphs.is_empty());
    }

    #[test]
    fn missing_fixture_file_is_an_io_error() {
        let err = FixtureBackend::from_file(Path::new("/nonexistent/fixture.txt"))
            .err()
            .unwrap();
        assert!(matches!(err, OcrError::Io(_)));
    }
}
