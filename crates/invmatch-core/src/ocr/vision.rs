//! Google Cloud Vision backend (DOCUMENT_TEXT_DETECTION).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{dump_raw_response, OcrBackend, OcrText};
use crate::error::OcrError;
use crate::models::DebugOptions;

const ANNOTATE_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Calls the Cloud Vision `images:annotate` endpoint with an API key.
pub struct CloudVisionBackend {
    api_key: String,
    client: reqwest::Client,
    debug: DebugOptions,
}

impl CloudVisionBackend {
    pub fn new(api_key: String, debug: DebugOptions) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            debug,
        }
    }
}

#[derive(Serialize)]
struct AnnotateRequest {
    requests: Vec<ImageRequest>,
}

#[derive(Serialize)]
struct ImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    full_text_annotation: Option<TextAnnotation>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[async_trait::async_trait]
impl OcrBackend for CloudVisionBackend {
    fn name(&self) -> &str {
        "cloud-vision"
    }

    async fn recognize(&self, image: &[u8]) -> Result<OcrText, OcrError> {
        if image.is_empty() {
            return Err(OcrError::InvalidImage("empty image payload".to_string()));
        }

        let body = AnnotateRequest {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: BASE64.encode(image),
                },
                features: vec![Feature {
                    feature_type: "DOCUMENT_TEXT_DETECTION",
                }],
            }],
        };

        info!("cloud-vision: annotating {} image bytes", image.len());

        let response = self
            .client
            .post(ANNOTATE_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload = response.text().await?;
        dump_raw_response(&self.debug, self.name(), &payload);

        if !status.is_success() {
            return Err(OcrError::Backend(format!(
                "vision API returned {status}"
            )));
        }

        let parsed: AnnotateResponse = serde_json::from_str(&payload)
            .map_err(|e| OcrError::Backend(format!("unparseable vision response: {e}")))?;

        let first = parsed
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| OcrError::Backend("empty vision response".to_string()))?;

        if let Some(err) = first.error {
            return Err(OcrError::Backend(err.message));
        }

        let text = first
            .full_text_annotation
            .map(|a| a.text)
            .unwrap_or_default();
        debug!("cloud-vision: recognized {} characters", text.len());

        Ok(OcrText::from_plain(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_image_is_rejected_before_any_network_call() {
        let backend = CloudVisionBackend::new("key".to_string(), DebugOptions::default());
        let err = backend.recognize(&[]).await.unwrap_err();
        assert!(matches!(err, OcrError::InvalidImage(_)));
    }

    #[test]
    fn annotate_request_shape() {
        let body = AnnotateRequest {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: BASE64.encode(b"img"),
                },
                features: vec![Feature {
                    feature_type: "DOCUMENT_TEXT_DETECTION",
                }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["requests"][0]["features"][0]["type"],
            "DOCUMENT_TEXT_DETECTION"
        );
        assert_eq!(json["requests"][0]["image"]["content"], "aW1n");
    }

    #[test]
    fn response_parsing_extracts_full_text() {
        let payload = r#"{"responses":[{"fullTextAnnotation":{"text":"Tomatoes 5 kg"}}]}"#;
        let parsed: AnnotateResponse = serde_json::from_str(payload).unwrap();
        let first = parsed.responses.into_iter().next().unwrap();
        assert_eq!(first.full_text_annotation.unwrap().text, "Tomatoes 5 kg");
    }

    #[test]
    fn response_parsing_surfaces_api_errors() {
        let payload = r#"{"responses":[{"error":{"message":"quota exceeded"}}]}"#;
        let parsed: AnnotateResponse = serde_json::from_str(payload).unwrap();
        let first = parsed.responses.into_iter().next().unwrap();
        assert_eq!(first.error.unwrap().message, "quota exceeded");
    }
}
