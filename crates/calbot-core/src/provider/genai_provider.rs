//! GenAI-based LLM provider implementation

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use genai::chat::{ChatMessage, ChatRequest, ChatStreamEvent};
use genai::resolver::{AuthData, AuthResolver};
use genai::Client;
use genai::WebConfig;
use tracing::debug;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::LlmProvider;

/// A provider implementation using genai
///
/// The configured deployment name is used as the model identifier.
/// Note: custom endpoints are accepted in the configuration but not fully
/// supported by genai yet; the provider's default API endpoint is used.
pub struct GenAiProvider {
    client: Client,
    model: String,
}

impl GenAiProvider {
    /// Default timeout for LLM API requests (5 minutes)
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    /// Create WebConfig with appropriate timeouts for LLM requests
    fn default_web_config() -> WebConfig {
        WebConfig::default()
            .with_timeout(Self::DEFAULT_TIMEOUT)
            .with_connect_timeout(Duration::from_secs(30))
    }

    /// Create a provider with a specific API key and model
    pub fn with_api_key(api_key: &str, model: &str) -> Self {
        let api_key = api_key.to_string();
        let auth_resolver = AuthResolver::from_resolver_fn(
            move |_model_iden| -> std::result::Result<Option<AuthData>, genai::resolver::Error> {
                Ok(Some(AuthData::from_single(api_key.clone())))
            },
        );

        let client = Client::builder()
            .with_web_config(Self::default_web_config())
            .with_auth_resolver(auth_resolver)
            .build();

        Self {
            client,
            model: model.to_string(),
        }
    }

    /// Create a provider from model-service configuration
    pub fn from_config(config: &LlmConfig) -> Self {
        Self::with_api_key(&config.api_key, &config.deployment)
    }
}

#[async_trait]
impl LlmProvider for GenAiProvider {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let chat_req = ChatRequest::default().append_message(ChatMessage::user(prompt));

        // Streamed to avoid response timeout issues on long completions
        let stream_response = self
            .client
            .exec_chat_stream(&self.model, chat_req, None)
            .await
            .map_err(|e| Error::Provider(e.to_string()))?;

        let mut content = String::new();
        let mut stream = stream_response.stream;

        while let Some(event) = stream.next().await {
            match event {
                Ok(ChatStreamEvent::Chunk(chunk)) => {
                    content.push_str(&chunk.content);
                }
                Ok(ChatStreamEvent::End(_)) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::Provider(e.to_string())),
            }
        }

        debug!(model = %self.model, chars = content.len(), "LLM completion received");
        Ok(content)
    }
}
