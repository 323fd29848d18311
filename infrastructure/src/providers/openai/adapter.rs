//! OpenAI-compatible responder
//!
//! Implements `AiResponder` over reqwest. The API key is resolved once at
//! construction; without one every call fails with `NotConfigured` and no
//! request is sent.

use super::types;
use crate::config::FileAiConfig;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use voicelog_application::{AiFailure, AiResponder, CompletionRequest};

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl OpenAiSettings {
    /// Settings from the `[ai]` config section, with the API key resolved.
    pub fn from_config(config: &FileAiConfig) -> Self {
        Self {
            api_key: config.resolve_api_key(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: config.timeout(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

pub struct OpenAiResponder {
    client: reqwest::Client,
    settings: OpenAiSettings,
}

impl OpenAiResponder {
    pub fn new(settings: OpenAiSettings) -> Result<Self, AiFailure> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AiFailure::ServiceError(format!("cannot build HTTP client: {}", e)))?;

        if settings.api_key.is_some() {
            info!(
                model = %settings.model,
                base_url = %settings.base_url,
                "AI provider configured"
            );
        } else {
            warn!(
                "No AI API key found; `ai:` commands and ask-ai will report the service as unconfigured"
            );
        }

        Ok(Self { client, settings })
    }

    pub fn is_configured(&self) -> bool {
        self.settings.api_key.is_some()
    }
}

#[async_trait]
impl AiResponder for OpenAiResponder {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiFailure> {
        let Some(api_key) = self.settings.api_key.as_deref() else {
            return Err(AiFailure::NotConfigured);
        };

        let body = types::build_request(&self.settings.model, self.settings.temperature, request);
        debug!(
            model = %self.settings.model,
            max_tokens = request.max_output_tokens,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.settings.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = types::error_message(&text).unwrap_or_else(|| status.to_string());
            warn!(status = status.as_u16(), "Chat completion request failed: {}", message);
            return Err(types::failure_for_status(status.as_u16(), message));
        }

        let parsed: types::ChatResponse = response
            .json()
            .await
            .map_err(|e| AiFailure::ServiceError(format!("malformed response: {}", e)))?;
        types::extract_reply(parsed)
    }
}

fn transport_failure(e: reqwest::Error) -> AiFailure {
    if e.is_timeout() {
        AiFailure::ServiceError("request timed out".to_string())
    } else {
        AiFailure::ServiceError(e.to_string())
    }
}
