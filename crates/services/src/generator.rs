use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl GeneratorConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("COACH_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("COACH_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("COACH_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Source of raw passage text, one response per prompt.
///
/// The coach only depends on this seam, so tests can script responses and the
/// HTTP client stays swappable.
#[async_trait]
pub trait PassageSource: Send + Sync {
    /// Whether the source can serve requests at all. When false the session
    /// stays empty and the presenter hides the generate control.
    fn is_available(&self) -> bool {
        true
    }

    /// Obtain one free-text response for the prompt.
    async fn complete(&self, prompt: &str) -> Result<String, GeneratorError>;
}

/// Chat-completion backed passage source.
#[derive(Clone)]
pub struct PassageGenerator {
    client: Client,
    config: Option<GeneratorConfig>,
}

impl PassageGenerator {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GeneratorConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GeneratorConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl PassageSource for PassageGenerator {
    fn is_available(&self) -> bool {
        self.enabled()
    }

    /// Request one passage response from the chat-completion endpoint.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError` when the source is disabled, the request
    /// fails, or the response carries no content.
    async fn complete(&self, prompt: &str) -> Result<String, GeneratorError> {
        let config = self.config.as_ref().ok_or(GeneratorError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeneratorError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GeneratorError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_without_config_is_disabled() {
        let generator = PassageGenerator::new(None);
        assert!(!generator.enabled());
        assert!(!generator.is_available());
    }

    #[tokio::test]
    async fn disabled_generator_refuses_to_complete() {
        let generator = PassageGenerator::new(None);
        let err = generator.complete("prompt").await.unwrap_err();
        assert!(matches!(err, GeneratorError::Disabled));
    }

    #[test]
    fn chat_response_tolerates_missing_content() {
        let body: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant"}}]
        }))
        .unwrap();
        assert!(body.choices[0].message.content.is_none());
    }
}
