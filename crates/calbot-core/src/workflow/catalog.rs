//! Tool catalog: discovery and per-session caching

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::Result;

use super::state::SessionState;

/// One named action exposed by the calendar service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Remote calendar actions, discoverable and callable by name.
///
/// Implemented over the MCP client in production and by scripted fakes in
/// tests.
#[async_trait]
pub trait CalendarTools: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>>;
    async fn invoke(&self, name: &str, arguments: Value) -> Result<Value>;

    /// Shut down the underlying transport, if any
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Name -> descriptor projection of the discovered catalog; keys are
/// exactly the session's `available_tools`.
pub type ToolMap = HashMap<String, ToolDescriptor>;

/// Fetch and cache the tool list, once per session.
///
/// A no-op when `available_tools` is already populated. A failure in the
/// underlying listing call is fatal to the session.
pub async fn cache_tools(
    state: &mut SessionState,
    tool_map: &mut ToolMap,
    tools: &dyn CalendarTools,
) -> Result<()> {
    if !state.available_tools.is_empty() {
        return Ok(());
    }

    let descriptors = tools.list_tools().await?;
    state.available_tools = descriptors.iter().map(|t| t.name.clone()).collect();
    *tool_map = descriptors
        .into_iter()
        .map(|t| (t.name.clone(), t))
        .collect();

    info!(tools = ?state.available_tools, "Available Calendly MCP tools");
    Ok(())
}
