//! Configuration for Calbot
//!
//! All configuration is environment-sourced: Calendly credentials and the
//! path to the local MCP server installation, plus the optional
//! model-service settings. A missing model-service endpoint degrades the
//! workflow (default plan, raw passthrough answers) rather than failing.

use std::collections::HashMap;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub calendly: CalendlyConfig,
    /// None when no model service is configured
    pub llm: Option<LlmConfig>,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self {
            calendly: CalendlyConfig::from_env(),
            llm: LlmConfig::from_env(),
        }
    }
}

/// Calendly service credentials and MCP server location
#[derive(Debug, Clone, Default)]
pub struct CalendlyConfig {
    pub api_key: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub user_uri: String,
    pub organization_uri: String,
    pub timezone: String,
    /// Path to the locally installed calendly-mcp-server
    pub mcp_path: String,
}

impl CalendlyConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env_or_default("CALENDLY_API_KEY", ""),
            client_id: env_or_default("CALENDLY_CLIENT_ID", ""),
            client_secret: env_or_default("CALENDLY_CLIENT_SECRET", ""),
            refresh_token: env_or_default("CALENDLY_REFRESH_TOKEN", ""),
            user_uri: env_or_default("CALENDLY_USER_URI", ""),
            organization_uri: env_or_default("CALENDLY_ORGANIZATION_URI", ""),
            timezone: env_or_default("CALENDLY_TIMEZONE", "UTC"),
            mcp_path: env_or_default("CALENDLY_MCP_PATH", "./calendly-mcp-server"),
        }
    }

    /// Command used to launch the MCP server subprocess
    pub fn server_command(&self) -> (String, Vec<String>) {
        (
            "node".to_string(),
            vec![format!("{}/dist/index.js", self.mcp_path)],
        )
    }

    /// Environment variables forwarded to the MCP server subprocess
    pub fn server_env(&self) -> HashMap<String, String> {
        HashMap::from([
            ("CALENDLY_API_KEY".to_string(), self.api_key.clone()),
            ("CALENDLY_CLIENT_ID".to_string(), self.client_id.clone()),
            (
                "CALENDLY_CLIENT_SECRET".to_string(),
                self.client_secret.clone(),
            ),
            (
                "CALENDLY_REFRESH_TOKEN".to_string(),
                self.refresh_token.clone(),
            ),
            ("CALENDLY_USER_URI".to_string(), self.user_uri.clone()),
            (
                "CALENDLY_ORGANIZATION_URI".to_string(),
                self.organization_uri.clone(),
            ),
        ])
    }
}

/// Model-service configuration (Azure-shaped endpoint surface)
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    /// Deployment name, used as the model identifier
    pub deployment: String,
    pub api_version: String,
}

impl LlmConfig {
    /// Read the model-service settings; None when no endpoint is configured
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("AZURE_OPENAI_ENDPOINT").ok()?;
        if endpoint.trim().is_empty() {
            return None;
        }

        Some(Self {
            endpoint,
            api_key: env_or_default("AZURE_OPENAI_API_KEY", ""),
            deployment: env_or_default("AZURE_OPENAI_DEPLOYMENT", "gpt-4o-mini"),
            api_version: env_or_default("OPENAI_API_VERSION", "2023-12-01-preview"),
        })
    }
}

fn env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
