use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "attrform",
    bin_name = "attrform",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Build records from declarative attribute schemas", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory searched for attrform.toml (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub config_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Construct a record from JSON input and print its attributes as JSON
    Build {
        /// Schema file (.toml or .json)
        schema: PathBuf,

        /// JSON input file; reads stdin when absent or "-"
        input: Option<PathBuf>,

        /// Drop undeclared input keys instead of failing
        #[arg(long)]
        ignore_undeclared: bool,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// List the attribute names a schema declares, in order
    Names {
        /// Schema file (.toml or .json)
        schema: PathBuf,
    },

    /// Show the resolved configuration
    Config,
}
