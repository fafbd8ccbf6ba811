//! Error types for Calbot Core

use thiserror::Error;

/// Result type alias using Calbot Error
pub type Result<T> = std::result::Result<T, Error>;

/// Calbot error types
///
/// Only tool invocation inside the workflow's execute step is recovered
/// locally (captured as data in the session state). Everything else
/// propagates here and surfaces at the HTTP or CLI boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("MCP error: {0}")]
    Mcp(#[from] calbot_mcp::client::McpError),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
