//! Groq API transform provider adapter
//!
//! Uses Groq's OpenAI-compatible chat completions endpoint. Text only:
//! the hosted models here have no vision input, so image sources are
//! rejected as unsupported.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ProviderError, TransformProvider};
use crate::domain::transform::TransformSource;

/// Groq model to use
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Groq API base URL
const API_BASE_URL: &str = "https://api.groq.com";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Groq chat-completions transform provider
pub struct GroqProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GroqProvider {
    /// Create a new Groq provider with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a new Groq provider with a custom model
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

    fn api_url(&self) -> String {
        format!("{}/openai/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TransformProvider for GroqProvider {
    async fn transform(
        &self,
        source: &TransformSource,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let text = source
            .as_text()
            .ok_or(ProviderError::UnsupportedSource("image"))?;

        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: format!("{prompt}{text}"),
            }],
        };

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();

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

        let response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(ProviderError::ApiError(error.message));
        }

        let text = response
            .choices
            .and_then(|mut choices| {
                if choices.is_empty() {
                    None
                } else {
                    choices.remove(0).message
                }
            })
            .and_then(|m| m.content)
            .unwrap_or_default();

        Ok(text.trim().to_string())
    }
}
