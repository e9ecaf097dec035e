//! Compose command implementation

use anyhow::{Context, Result};
use clap::Args;
use configurant::{ArgvSource, Session, SourceRegistry};

use super::utils::{render_json, OptionFlags};

#[derive(Args)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub options: OptionFlags,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Arguments read by the argv source (pass after `--`)
    #[arg(last = true, value_name = "APP_ARGS")]
    pub app_args: Vec<String>,
}

pub fn run(args: ComposeArgs) -> Result<()> {
    let registry = SourceRegistry::builtin().with_argv(ArgvSource::from_args(args.app_args));
    let mut session = Session::with_registry(registry);

    let config = session
        .compose(args.options.to_overrides())
        .context("Failed to compose configuration")?;
    println!("{}", render_json(config, args.compact)?);

    Ok(())
}
