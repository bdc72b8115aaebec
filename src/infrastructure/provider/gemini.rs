//! Gemini API transform provider adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ProviderError, TransformProvider};
use crate::domain::transform::TransformSource;

use super::png_base64;

/// Gemini API model to use
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// Request types for Gemini API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

// Response types for Gemini API

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Gemini API transform provider
pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a new Gemini provider with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Build the request body
    fn build_request(
        &self,
        source: &TransformSource,
        prompt: &str,
    ) -> Result<GenerateContentRequest, ProviderError> {
        let parts = match source {
            TransformSource::Text(text) => vec![Part {
                text: Some(format!("{prompt}{text}")),
                inline_data: None,
            }],
            TransformSource::Image(image) => vec![
                Part {
                    text: Some(prompt.to_string()),
                    inline_data: None,
                },
                Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: "image/png".to_string(),
                        data: png_base64(image)?,
                    }),
                },
            ],
        };

        Ok(GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: Some(GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 2048,
            }),
        })
    }

    /// Extract text from response
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let parts: Vec<&str> = response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }
}

#[async_trait]
impl TransformProvider for GeminiProvider {
    async fn transform(
        &self,
        source: &TransformSource,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let url = self.api_url();
        let body = self.build_request(source, prompt)?;

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();

        // Handle HTTP errors
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

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

        // Parse response
        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        // Check for API error in response body
        if let Some(error) = response.error {
            return Err(ProviderError::ApiError(error.message));
        }

        // An empty or missing candidate is a valid no-op result for the
        // pipeline, not an error
        let text = Self::extract_text(&response).unwrap_or_default();

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transform::ClipboardImage;

    #[test]
    fn build_request_concatenates_prompt_and_text() {
        let provider = GeminiProvider::new("test-key");
        let source = TransformSource::Text("teh cat".to_string());

        let request = provider.build_request(&source, "Fix: ").unwrap();

        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role, "user");
        assert_eq!(
            request.contents[0].parts[0].text.as_deref(),
            Some("Fix: teh cat")
        );
        assert!(request.contents[0].parts[0].inline_data.is_none());
    }

    #[test]
    fn build_request_attaches_image_as_png_part() {
        let provider = GeminiProvider::new("test-key");
        let source = TransformSource::Image(ClipboardImage::new(1, 1, vec![255, 0, 0, 255]));

        let request = provider.build_request(&source, "Describe: ").unwrap();

        let parts = &request.contents[0].parts;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].text.as_deref(), Some("Describe: "));
        let inline = parts[1].inline_data.as_ref().unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert!(!inline.data.is_empty());
    }

    #[test]
    fn api_url_contains_model_and_key() {
        let provider = GeminiProvider::new("test-api-key");
        let url = provider.api_url();

        assert!(url.contains("gemini-2.0-flash"));
        assert!(url.contains("test-api-key"));
        assert!(url.contains("generateContent"));
    }

    #[test]
    fn custom_model() {
        let provider = GeminiProvider::with_model("key", "custom-model");
        let url = provider.api_url();

        assert!(url.contains("custom-model"));
    }

    #[test]
    fn extract_text_from_response() {
        let response = GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(CandidateContent {
                    parts: Some(vec![ResponsePart {
                        text: Some("Hello world".to_string()),
                    }]),
                }),
            }]),
            error: None,
        };

        let text = GeminiProvider::extract_text(&response);
        assert_eq!(text, Some("Hello world".to_string()));
    }

    #[test]
    fn extract_text_empty_response() {
        let response = GenerateContentResponse {
            candidates: None,
            error: None,
        };

        let text = GeminiProvider::extract_text(&response);
        assert!(text.is_none());
    }
}
