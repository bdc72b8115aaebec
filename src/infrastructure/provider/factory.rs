//! Provider factory: build the configured transform provider

use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::application::ports::TransformProvider;
use crate::domain::config::AppConfig;

use super::gemini::GeminiProvider;
use super::groq::GroqProvider;
use super::ollama::OllamaProvider;

/// Available transform providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Google Gemini (hosted, text + image)
    #[default]
    Gemini,
    /// Groq chat completions (hosted, text only)
    Groq,
    /// Ollama (local daemon, text + image)
    Ollama,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Groq => write!(f, "groq"),
            ProviderKind::Ollama => write!(f, "ollama"),
        }
    }
}

/// Error when building a provider from configuration
#[derive(Debug, Clone, Error)]
pub enum ProviderSetupError {
    #[error("Unknown provider \"{0}\". Valid providers: gemini, groq, ollama")]
    UnknownProvider(String),

    #[error("Missing API key for {provider}. Set {env_var} or configure providers.{provider}.api_key")]
    MissingApiKey {
        provider: ProviderKind,
        env_var: &'static str,
    },
}

impl FromStr for ProviderKind {
    type Err = ProviderSetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "groq" => Ok(ProviderKind::Groq),
            "ollama" => Ok(ProviderKind::Ollama),
            _ => Err(ProviderSetupError::UnknownProvider(s.to_string())),
        }
    }
}

/// Resolve an API key from config, falling back to the environment
fn resolve_api_key(
    configured: Option<String>,
    env_var: &'static str,
    provider: ProviderKind,
) -> Result<String, ProviderSetupError> {
    configured
        .filter(|k| !k.trim().is_empty())
        .or_else(|| env::var(env_var).ok().filter(|k| !k.trim().is_empty()))
        .ok_or(ProviderSetupError::MissingApiKey { provider, env_var })
}

/// Create the transform provider selected by the configuration.
///
/// Returns the provider and the resolved kind, or an error when the
/// selection is unknown or its credentials are missing.
pub fn create_provider(
    config: &AppConfig,
) -> Result<(Box<dyn TransformProvider>, ProviderKind), ProviderSetupError> {
    let kind: ProviderKind = config.provider_or_default().parse()?;
    let providers = config.providers.as_ref();

    match kind {
        ProviderKind::Gemini => {
            let section = providers.and_then(|p| p.gemini.as_ref());
            let api_key = resolve_api_key(
                section.and_then(|c| c.api_key.clone()),
                "GEMINI_API_KEY",
                kind,
            )?;
            let provider = match section.and_then(|c| c.model.clone()) {
                Some(model) => GeminiProvider::with_model(api_key, model),
                None => GeminiProvider::new(api_key),
            };
            Ok((Box::new(provider), kind))
        }
        ProviderKind::Groq => {
            let section = providers.and_then(|p| p.groq.as_ref());
            let api_key = resolve_api_key(
                section.and_then(|c| c.api_key.clone()),
                "GROQ_API_KEY",
                kind,
            )?;
            let provider = match section.and_then(|c| c.model.clone()) {
                Some(model) => GroqProvider::with_model(api_key, model),
                None => GroqProvider::new(api_key),
            };
            Ok((Box::new(provider), kind))
        }
        ProviderKind::Ollama => {
            let section = providers.and_then(|p| p.ollama.as_ref());
            let provider = match (
                section.and_then(|c| c.host.clone()),
                section.and_then(|c| c.model.clone()),
            ) {
                (Some(host), Some(model)) => OllamaProvider::with_host_and_model(host, model),
                (Some(host), None) => OllamaProvider::with_host_and_model(host, "llama3"),
                (None, Some(model)) => {
                    OllamaProvider::with_host_and_model("http://localhost:11434", model)
                }
                (None, None) => OllamaProvider::new(),
            };
            Ok((Box::new(provider), kind))
        }
    }
}
