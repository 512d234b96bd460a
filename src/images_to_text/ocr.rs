use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use super::OcrBackend;
use crate::config::ImportConfig;
use crate::error::ImportError;

/// Image OCR through the Google Cloud Vision `images:annotate` API.
pub struct GoogleVisionBackend {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GoogleVisionBackend {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Backend from configuration, or `None` when no API key is available
    /// (neither `ocr.google_api_key` nor `GOOGLE_API_KEY`).
    pub fn from_config(config: &ImportConfig) -> Option<Self> {
        config
            .google_api_key()
            .map(|key| Self::new(key, config.ocr.endpoint.clone()))
    }
}

#[async_trait]
impl OcrBackend for GoogleVisionBackend {
    fn supports(&self, mime: &str) -> bool {
        mime.starts_with("image/")
    }

    async fn extract_text(&self, bytes: &[u8], mime: &str) -> Result<String, ImportError> {
        let request_body = json!({
            "requests": [{
                "image": {
                    "content": STANDARD.encode(bytes)
                },
                "features": [{
                    "type": "TEXT_DETECTION"
                }]
            }]
        });

        debug!("Sending {} OCR request to Google Vision API", mime);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .header("Accept-Encoding", "identity")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ImportError::OcrError(format!(
                "Google Vision API error ({}): {}",
                status, error_text
            )));
        }

        let response_body: Value = response.json().await?;

        // All detected text is in the first response's full annotation
        let text = response_body["responses"][0]["fullTextAnnotation"]["text"]
            .as_str()
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ImportError::OcrError("No text detected in image".to_string()));
        }

        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_vision_response_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/images:annotate")
            .match_query(mockito::Matcher::UrlEncoded(
                "key".into(),
                "test-key".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"responses":[{"fullTextAnnotation":{"text":"Pancakes\nIngredients:\n1 cup flour"}}]}"#)
            .create_async()
            .await;

        let backend = GoogleVisionBackend::new(
            "test-key",
            format!("{}/v1/images:annotate", server.url()),
        );
        let text = backend.extract_text(b"\xFF\xD8", "image/jpeg").await.unwrap();

        assert!(text.starts_with("Pancakes"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_vision_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/images:annotate")
            .match_query(mockito::Matcher::Any)
            .with_status(403)
            .with_body("API key invalid")
            .create_async()
            .await;

        let backend = GoogleVisionBackend::new(
            "bad-key",
            format!("{}/v1/images:annotate", server.url()),
        );
        let err = backend.extract_text(b"\xFF\xD8", "image/jpeg").await.unwrap_err();

        assert!(matches!(err, ImportError::OcrError(ref msg) if msg.contains("403")));
    }

    #[tokio::test]
    async fn test_vision_empty_annotation() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/images:annotate")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"responses":[{}]}"#)
            .create_async()
            .await;

        let backend = GoogleVisionBackend::new("k", format!("{}/v1/images:annotate", server.url()));
        let err = backend.extract_text(b"\xFF\xD8", "image/png").await.unwrap_err();
        assert!(err.is_extraction_failure());
    }
}
