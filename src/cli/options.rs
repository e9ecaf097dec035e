//! Options command implementation

use anyhow::{Context, Result};
use clap::Args;
use configurant::{ArgvSource, Session, SourceRegistry};

use super::utils::{render_json, OptionFlags};

#[derive(Args)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub options: OptionFlags,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

pub fn run(args: OptionsArgs) -> Result<()> {
    // The tool's own arguments are not application arguments.
    let registry = SourceRegistry::builtin().with_argv(ArgvSource::from_args(Vec::<String>::new()));
    let mut session = Session::with_registry(registry);
    session
        .compose(args.options.to_overrides())
        .context("Failed to compose configuration")?;
    println!("{}", render_json(session.options(), args.compact)?);

    Ok(())
}
