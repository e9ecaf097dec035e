//! Command-line interface for configurant
//!
//! Provides `compose` and `options` subcommands sharing the same option flags.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod compose;
mod options;
mod utils;

/// Compose application configuration from files, environment variables and arguments
#[derive(Parser)]
#[command(name = "configurant")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the configuration and print it as JSON
    Compose(compose::ComposeArgs),

    /// Compose the configuration and print the options that were used
    Options(options::OptionsArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Compose(args) => compose::run(args),
        Commands::Options(args) => options::run(args),
    }
}
