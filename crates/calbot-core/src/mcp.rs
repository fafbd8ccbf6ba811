//! Calendar tool access over MCP
//!
//! Bridges the workflow's `CalendarTools` seam onto the MCP client: the
//! Calendly server is spawned as a subprocess and spoken to over stdio.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use calbot_mcp::client::{ClientInfo, McpClient, McpError};
use calbot_mcp::transport::StdioTransport;

use crate::config::CalendlyConfig;
use crate::error::Result;
use crate::workflow::{CalendarTools, ToolDescriptor};

/// CalendarTools implementation backed by the Calendly MCP server
pub struct McpCalendarTools {
    client: McpClient<StdioTransport>,
}

impl McpCalendarTools {
    /// Spawn the Calendly MCP server and initialize the session.
    ///
    /// Credentials are forwarded to the subprocess through its
    /// environment; a failure here is fatal to startup.
    pub async fn connect(config: &CalendlyConfig) -> Result<Self> {
        let (command, args) = config.server_command();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        info!(%command, ?args, "Starting Calendly MCP server");
        let transport = StdioTransport::spawn(&command, &args, &config.server_env()).await?;

        let client = McpClient::new(transport);
        let server = client
            .initialize(ClientInfo {
                name: "calbot".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            })
            .await?;

        info!(server = %server.name, version = %server.version, "Calendly MCP server ready");
        Ok(Self { client })
    }
}

#[async_trait]
impl CalendarTools for McpCalendarTools {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
        let tools = self.client.list_tools().await?;
        Ok(tools
            .into_iter()
            .map(|t| ToolDescriptor {
                name: t.name,
                description: t.description,
            })
            .collect())
    }

    async fn invoke(&self, name: &str, arguments: Value) -> Result<Value> {
        let result = self.client.call_tool(name, arguments).await?;
        let text = result.joined_text();

        // The server reports tool-level failures in-band
        if result.is_error {
            return Err(McpError::Server(text).into());
        }

        // Content is usually JSON carried as text; fall back to the
        // literal text when it is not
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    /// Shut down the server subprocess
    async fn close(&self) -> Result<()> {
        Ok(self.client.close().await?)
    }
}
