//! proj-setup CLI - Python project scaffolding
//!
//! This is the main entry point for the proj-setup command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use proj_setup_core::{ConfigLoader, SetupConfig};
use proj_setup_steps::StepContext;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let cwd = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow::anyhow!("Current directory is not valid UTF-8: {}", p.display()))?;
    let ctx = StepContext::from_config(&config, cwd);

    match cli.command {
        Commands::Layout(args) => commands::layout::run(args, &ctx).await,
        Commands::GitSetup(args) => commands::git_setup::run(args, &ctx, &config).await,
        Commands::VenvSetup(args) => commands::venv_setup::run(args, &ctx).await,
        Commands::CliConfig(args) => commands::cli_config::run(args, &ctx).await,
        Commands::ProjectInit(args) => commands::project_init::run(args, &ctx, &config).await,
    }
}

fn load_config(path: Option<&camino::Utf8Path>) -> Result<SetupConfig> {
    let loader = ConfigLoader::new()?;
    let config = match path {
        Some(path) => loader.load_file(path)?,
        None => loader.load()?,
    };
    tracing::debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

/// Initialize tracing on stderr; RUST_LOG takes precedence over -v/-q
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
