//! Transform provider port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transform::TransformSource;

/// Transform provider errors
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Provider does not support {0} sources")]
    UnsupportedSource(&'static str),

    #[error("Invalid source data: {0}")]
    InvalidSource(String),
}

/// Port for text/image transformation.
///
/// The provider is a black box: it returns the transformed text or fails.
/// An empty result is valid and means the pipeline has nothing to paste.
/// Retry policy, if any, belongs to the provider, not to callers.
#[async_trait]
pub trait TransformProvider: Send + Sync {
    /// Transform source material under the given prompt.
    ///
    /// # Arguments
    /// * `source` - Clipboard text or image to transform
    /// * `prompt` - Action prompt prefixed to the source
    async fn transform(
        &self,
        source: &TransformSource,
        prompt: &str,
    ) -> Result<String, ProviderError>;
}

/// Blanket implementation for boxed provider types
#[async_trait]
impl TransformProvider for Box<dyn TransformProvider> {
    async fn transform(
        &self,
        source: &TransformSource,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        self.as_ref().transform(source, prompt).await
    }
}
