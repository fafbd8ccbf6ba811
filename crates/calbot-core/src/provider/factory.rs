//! Provider creation from configuration

use std::sync::Arc;

use tracing::info;

use crate::config::LlmConfig;

use super::{GenAiProvider, LlmProvider};

/// Build the LLM provider from the optional model-service configuration.
///
/// No configured endpoint means no provider: the workflow runs in
/// degraded mode (default plan, raw result passthrough).
pub fn create_provider(config: Option<&LlmConfig>) -> Option<Arc<dyn LlmProvider>> {
    let config = config?;

    info!(deployment = %config.deployment, "LLM provider configured");
    Some(Arc::new(GenAiProvider::from_config(config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_config_no_provider() {
        assert!(create_provider(None).is_none());
    }

    #[test]
    fn test_configured_provider() {
        let config = LlmConfig {
            endpoint: "https://example.openai.azure.com".to_string(),
            api_key: "secret".to_string(),
            deployment: "gpt-4o-mini".to_string(),
            api_version: "2023-12-01-preview".to_string(),
        };

        let provider = create_provider(Some(&config)).unwrap();
        assert_eq!(provider.name(), "gpt-4o-mini");
    }
}
