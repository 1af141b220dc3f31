//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputFormat;

/// fieldshape - reshape and validate records
#[derive(Parser, Debug)]
#[command(
    name = "fsh",
    author,
    version,
    about = "Shape JSON records through allowlists, transformations, and conditional fields",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Shape a JSON record through a profile
    Shape {
        /// JSON file to read, or - for stdin
        #[arg(required = true)]
        input: PathBuf,

        /// Profile to apply (no profile passes the record through unchanged)
        #[arg(short, long)]
        profile: Option<String>,

        /// Output format: json, yaml, or xml (default from config)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Validate a JSON record against a profile's validators
    Validate {
        /// JSON file to read, or - for stdin
        #[arg(required = true)]
        input: PathBuf,

        /// Profile whose validators to run
        #[arg(short, long, required = true)]
        profile: String,
    },

    /// Encode a JSON record directly as JSON, YAML, or XML, without shaping
    Encode {
        /// JSON file to read, or - for stdin
        #[arg(required = true)]
        input: PathBuf,

        /// Output format: json, yaml, or xml
        #[arg(short, long, default_value = "yaml")]
        format: OutputFormat,
    },

    /// List configured profiles
    Profiles,
}
