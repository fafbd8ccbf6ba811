//! Calbot HTTP server
//!
//! Serves scheduling questions against Calendly: spawns the Calendly MCP
//! server at startup, wires up the optional LLM provider, and exposes the
//! ask endpoint.

mod routes;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use calbot_core::{AppContext, Config};

#[derive(Parser)]
#[command(name = "calbot-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Calendly scheduling assistant HTTP API", long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let context = Arc::new(
        AppContext::init(config)
            .await
            .context("Failed to connect to Calendly MCP server")?,
    );

    let app = routes::router(context.clone());

    let listener = TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;
    info!(addr = %cli.bind, "Calendly Scheduling API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down Calendly MCP client");
    context.shutdown().await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
