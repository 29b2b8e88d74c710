//! wsp-ide-catalog - inspect the IDE image table
//!
//! Loads the built-in table (or a substitute TOML table) and answers the
//! same lookups the provisioning system performs: repository by IDE
//! identifier, pinned version, and the composed image reference.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use commands::Cli;
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli.run(config) {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
