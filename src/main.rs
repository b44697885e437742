//! Toolgate - validation and sandboxing layer for tool-augmented AI agents
//!
//! Main entry point for the toolgate CLI.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use toolgate::cli::{Cli, Commands};
use toolgate::commands;
use toolgate::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let config = Config::load(&cli.config)?;
    config.validate()?;

    match cli.command {
        Commands::Check { target } => {
            let accepted = commands::handle_check(&target);
            if !accepted {
                std::process::exit(1);
            }
        }
        Commands::Tools { agent, json } => {
            commands::handle_tools(agent.as_deref(), json, &config)?;
        }
    }

    Ok(())
}

/// Initialize the tracing subscriber
///
/// Respects `RUST_LOG` when set; `--verbose` raises the default level to
/// debug.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "toolgate=debug" } else { "toolgate=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
