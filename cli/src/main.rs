//! `tasks`: interactive terminal client for the task service.

mod config;
mod repl;
mod transport;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser};
use task_core::{TaskApp, TaskClient};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::transport::UreqTransport;

#[derive(Debug, Parser)]
#[command(name = "tasks", version, about = "Terminal client for the task service")]
struct Cli {
    /// Origin of the task API, e.g. http://127.0.0.1:3000
    #[arg(long, env = "TASKS_API_URL")]
    api_url: Option<String>,

    /// TOML file providing `api_url`
    #[arg(long)]
    config: Option<PathBuf>,

    /// More log output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Less log output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    quiet: u8,
}

fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "off"
    } else if quiet == 1 {
        "error"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    let cfg = Config::resolve(cli.api_url, cli.config.as_deref())?;
    info!(api_url = %cfg.api_url, "starting tasks client");

    let client = TaskClient::new(&cfg.api_url, UreqTransport::new());
    let mut app = TaskApp::new(client);
    repl::run(&mut app).await
}
