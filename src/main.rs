//! bot-sweep CLI entry point

mod cli;

use anstream::eprintln;
use bot_sweep::config::DEFAULT_CONFIG_PATH;
use clap::Parser;
use cli::style::Stylize;
use cli::sweep::{SweepCommand, run_sweep};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Auto-merge bot pull requests across GitHub repositories
#[derive(Parser)]
#[command(name = "bot-sweep", version, about, long_about = None)]
struct Cli {
    /// Path to the JSON file listing repositories
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Owner used for repository entries without one
    #[arg(long, env = "GITHUB_USERNAME")]
    username: Option<String>,

    /// GitHub Enterprise host (e.g. github.example.com)
    #[arg(long, env = "GITHUB_HOST")]
    host: Option<String>,

    /// Pause between repositories, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Show what would be merged without merging
    #[arg(long)]
    dry_run: bool,

    /// Ask before merging each repository's eligible PRs
    #[arg(long, conflicts_with = "dry_run")]
    confirm: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "bot_sweep=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = SweepCommand {
        config_path: cli.config,
        host: cli.host,
        username: cli.username,
        delay: Duration::from_millis(cli.delay_ms),
        dry_run: cli.dry_run,
        confirm: cli.confirm,
    };

    match run_sweep(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".error());
            ExitCode::FAILURE
        }
    }
}
