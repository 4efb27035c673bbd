//! GAqP Action Plan MCP Server - Main Entry Point
//!
//! The actual implementation is in the `gaqp_plan` library.

use anyhow::Result;
use clap::Parser;
use gaqp_plan::PlanServerHandler;
use mcp_attr::server::serve_stdio;

/// GAqP Action Plan Server - aquaculture biosecurity action plans via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON task list to seed the plan with (default plan if omitted or missing)
    #[arg(long)]
    plan: Option<String>,

    /// TOML file defining modules and phases (GAqP layout if omitted)
    #[arg(long)]
    catalog: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP stream, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();
    let handler = PlanServerHandler::new(args.plan.as_deref(), args.catalog.as_deref())?;
    tracing::info!("serving action plan over stdio");
    serve_stdio(handler).await?;
    Ok(())
}
