//! # CLI Behavior
//!
//! The CLI is one client of the `attrform` library. It is the only place that
//! knows about stdin, stdout, exit codes and log output.
//!
//! ## Input
//!
//! `attrform build <schema> [input]` reads the JSON input from the given file,
//! or from stdin when the argument is absent or `-`. Empty input means no
//! attributes were supplied, so defaults apply and required attributes fail.
//!
//! ## Configuration
//!
//! `attrform.toml` is looked up in `--config-dir`, or the current directory.
//! `attrform config` prints the resolved values.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `handlers`: Per-command handlers that call the library and build output
//! - `logging`: tracing subscriber setup

mod handlers;
mod logging;
mod setup;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use attrform::AttrformConfig;
use clap::Parser;
use tracing::debug;

use setup::{Cli, Commands};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };
    let config = AttrformConfig::load(&config_dir);
    debug!(dir = %config_dir.display(), ?config, "configuration resolved");

    let output = match cli.command {
        Commands::Build {
            schema,
            input,
            ignore_undeclared,
            compact,
        } => {
            let schema = handlers::load_schema(&config, &schema)?;
            let raw = read_input(input.as_deref())?;
            handlers::build(&config, schema, &raw, ignore_undeclared, compact)?
        }
        Commands::Names { schema } => handlers::names(&handlers::load_schema(&config, &schema)?),
        Commands::Config => handlers::show_config(&config)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read input {}", path.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
