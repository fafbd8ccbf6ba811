//! Application context
//!
//! The remote-tool client and the LLM provider are constructed once at
//! process start and threaded into every request handler. There is no
//! lazily initialized global state.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::mcp::McpCalendarTools;
use crate::provider::{create_provider, LlmProvider};
use crate::workflow::{CalendarTools, Workflow};

/// Shared, read-only application handles
#[derive(Clone)]
pub struct AppContext {
    pub tools: Arc<dyn CalendarTools>,
    pub provider: Option<Arc<dyn LlmProvider>>,
    pub config: Config,
}

impl AppContext {
    /// Build the context: spawn the MCP server and configure the provider.
    pub async fn init(config: Config) -> Result<Self> {
        let tools = McpCalendarTools::connect(&config.calendly).await?;
        let provider = create_provider(config.llm.as_ref());

        Ok(Self {
            tools: Arc::new(tools),
            provider,
            config,
        })
    }

    /// Build a context over explicit handles (used by tests)
    pub fn with_handles(
        tools: Arc<dyn CalendarTools>,
        provider: Option<Arc<dyn LlmProvider>>,
        config: Config,
    ) -> Self {
        Self {
            tools,
            provider,
            config,
        }
    }

    /// Whether a language model is configured
    pub fn llm_available(&self) -> bool {
        self.provider.is_some()
    }

    /// A workflow over this context's handles
    pub fn workflow(&self) -> Workflow {
        Workflow::new(
            self.tools.clone(),
            self.provider.clone(),
            self.config.calendly.clone(),
        )
    }

    /// Shut down the calendar client (stops the MCP server subprocess)
    pub async fn shutdown(&self) -> Result<()> {
        self.tools.close().await
    }
}
