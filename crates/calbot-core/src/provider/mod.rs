//! LLM provider abstraction
//!
//! The workflow only needs prompt-in, text-out completion. Everything
//! behind that seam (model service, auth, transport) lives in the
//! GenAI-backed implementation; tests substitute scripted providers.

mod factory;
mod genai_provider;

pub use factory::create_provider;
pub use genai_provider::GenAiProvider;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name, for health reporting and logs
    fn name(&self) -> &str;

    /// Send a single prompt and return the assistant's text
    async fn complete(&self, prompt: &str) -> Result<String>;
}
