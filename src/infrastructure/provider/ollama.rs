//! Ollama transform provider adapter
//!
//! Talks to a local (or remote) Ollama daemon via `/api/generate`.
//! Images ride along as base64 PNG in the `images` field for multimodal
//! models.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ProviderError, TransformProvider};
use crate::domain::transform::TransformSource;

use super::png_base64;

/// Ollama model to use
const DEFAULT_MODEL: &str = "llama3";

/// Default Ollama host
const DEFAULT_HOST: &str = "http://localhost:11434";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
    error: Option<String>,
}

/// Ollama transform provider
pub struct OllamaProvider {
    host: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// Create a provider against the default local daemon
    pub fn new() -> Self {
        Self::with_host_and_model(DEFAULT_HOST, DEFAULT_MODEL)
    }

    /// Create a provider with a custom host and model
    pub fn with_host_and_model(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/api/generate", self.host.trim_end_matches('/'))
    }

    fn build_request(
        &self,
        source: &TransformSource,
        prompt: &str,
    ) -> Result<GenerateRequest, ProviderError> {
        let (prompt, images) = match source {
            TransformSource::Text(text) => (format!("{prompt}{text}"), None),
            TransformSource::Image(image) => {
                (prompt.to_string(), Some(vec![png_base64(image)?]))
            }
        };

        Ok(GenerateRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
            images,
        })
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransformProvider for OllamaProvider {
    async fn transform(
        &self,
        source: &TransformSource,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let body = self.build_request(source, prompt)?;

        let response = self
            .client
            .post(self.api_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(ProviderError::ApiError(error));
        }

        Ok(response.response.unwrap_or_default().trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transform::ClipboardImage;

    #[test]
    fn api_url_strips_trailing_slash() {
        let provider = OllamaProvider::with_host_and_model("http://box:11434/", "llama3");
        assert_eq!(provider.api_url(), "http://box:11434/api/generate");
    }

    #[test]
    fn text_request_has_no_images() {
        let provider = OllamaProvider::new();
        let request = provider
            .build_request(&TransformSource::Text("hi".to_string()), "Echo: ")
            .unwrap();

        assert_eq!(request.prompt, "Echo: hi");
        assert!(!request.stream);
        assert!(request.images.is_none());
    }

    #[test]
    fn image_request_carries_base64_png() {
        let provider = OllamaProvider::new();
        let source = TransformSource::Image(ClipboardImage::new(1, 1, vec![0, 0, 0, 255]));
        let request = provider.build_request(&source, "Describe: ").unwrap();

        assert_eq!(request.prompt, "Describe: ");
        let images = request.images.unwrap();
        assert_eq!(images.len(), 1);
        assert!(!images[0].is_empty());
    }
}
