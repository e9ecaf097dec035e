//! configurant: compose application configuration from ordered sources
//!
//! Prints the configuration composed from configuration files, environment
//! variables and command-line arguments as JSON.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
