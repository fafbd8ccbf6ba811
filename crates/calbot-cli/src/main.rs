//! Calbot CLI - one-shot scheduling questions from the command line

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use calbot_core::{AppContext, Config};

#[derive(Parser)]
#[command(name = "calbot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Calendly scheduling workflow", long_about = None)]
struct Cli {
    /// Question to ask about Calendly
    question: Vec<String>,

    /// Enable verbose debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut question = cli.question.join(" ").trim().to_string();
    if question.is_empty() {
        question = prompt_for_question()?;
    }
    if question.is_empty() {
        anyhow::bail!("No question provided.");
    }

    let config = Config::from_env();
    let context = AppContext::init(config)
        .await
        .context("Failed to connect to Calendly MCP server")?;

    info!(%question, "Running Calendly workflow");
    let answer = context.workflow().answer(&question).await?;
    println!("{}", answer);

    info!("Shutting down Calendly MCP client");
    context.shutdown().await?;

    Ok(())
}

fn prompt_for_question() -> io::Result<String> {
    print!("Enter your Calendly question: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
