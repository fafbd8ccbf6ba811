//! Calbot Core - Calendly scheduling assistant
//!
//! This crate provides the core functionality for Calbot:
//! - Environment-sourced configuration
//! - LLM provider abstraction
//! - Calendar tool access over MCP
//! - The four-step scheduling workflow

pub mod config;
pub mod context;
pub mod error;
pub mod mcp;
pub mod provider;
pub mod workflow;

pub use config::{CalendlyConfig, Config, LlmConfig};
pub use context::AppContext;
pub use error::{Error, Result};
pub use mcp::McpCalendarTools;
pub use provider::{create_provider, GenAiProvider, LlmProvider};
pub use workflow::{
    CalendarTools, Plan, PlanSource, SessionState, ToolDescriptor, Workflow,
};
