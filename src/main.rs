// ABOUTME: Entry point for the restartctl CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use restartctl::cluster::LogOptions;
use restartctl::config;
use restartctl::error::Result;
use restartctl::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbose flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output = Output::new(if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    });

    match cli.command {
        Commands::Init { force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Restart {
            target_cluster,
            operator,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::restart(config, &target_cluster, operator, output).await
        }
        Commands::Logs {
            target_cluster,
            pod,
            container,
            follow,
            tail,
            timestamps,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            let opts = LogOptions {
                container,
                follow,
                timestamps,
                tail,
            };
            commands::logs(config, &target_cluster, pod, opts, output).await
        }
    }
}
