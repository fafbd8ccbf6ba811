//! Calbot MCP - Model Context Protocol client
//!
//! This crate speaks JSON-RPC 2.0 over newline-delimited JSON to the
//! Calendly MCP server, which runs as a local subprocess.

pub mod client;
pub mod protocol;
pub mod transport;

use serde::{Deserialize, Serialize};

/// MCP protocol version
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Tool definition in MCP format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpTool {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "inputSchema", default)]
    pub input_schema: serde_json::Value,
}
