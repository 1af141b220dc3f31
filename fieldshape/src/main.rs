//! fsh - fieldshape command-line entry point
//!
//! Reads JSON records and shapes, validates, or re-encodes them using the
//! profiles from the configuration file.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use fieldshape::cli::{Cli, Command};
use fieldshape::config::{Config, OutputFormat};
use fieldshape::{FieldMap, Serializer, ShapeConfig, codec};

fn setup_logging(verbose: bool) -> Result<()> {
    // Logs go to stderr so stdout stays clean for shaped output
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "fieldshape loaded config: profiles={}, default-format={}",
        config.profiles.len(),
        config.default_format
    );

    match cli.command {
        Command::Shape { input, profile, format } => {
            cmd_shape(&config, &input, profile.as_deref(), format.unwrap_or(config.default_format))
        }
        Command::Validate { input, profile } => cmd_validate(&config, &input, &profile),
        Command::Encode { input, format } => cmd_encode(&config, &input, format),
        Command::Profiles => cmd_profiles(&config),
    }
}

/// Run a record through a profile's pipeline and print the result
fn cmd_shape(config: &Config, input: &Path, profile: Option<&str>, format: OutputFormat) -> Result<ExitCode> {
    let shape_config = match profile {
        Some(name) => config.profile(name)?.build(),
        None => ShapeConfig::new(),
    };
    let serializer = Serializer::new(shape_config);

    let record = read_record(input)?;
    let shaped = serializer.apply(record)?;

    println!("{}", render(config, &Value::Object(shaped), format)?);
    Ok(ExitCode::SUCCESS)
}

/// Run a profile's validators over a record
fn cmd_validate(config: &Config, input: &Path, profile: &str) -> Result<ExitCode> {
    let serializer = Serializer::new(config.profile(profile)?.build());
    let record = read_record(input)?;

    match serializer.validate(&record) {
        Ok(()) => {
            println!("{} {} is valid for profile {}", "✓".green(), input.display(), profile.cyan());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Encode a record without shaping it
fn cmd_encode(config: &Config, input: &Path, format: OutputFormat) -> Result<ExitCode> {
    let record = read_record(input)?;
    println!("{}", render(config, &Value::Object(record), format)?);
    Ok(ExitCode::SUCCESS)
}

/// List configured profiles
fn cmd_profiles(config: &Config) -> Result<ExitCode> {
    if config.profiles.is_empty() {
        println!("No profiles configured");
        return Ok(ExitCode::SUCCESS);
    }

    for (name, spec) in &config.profiles {
        let fields = if spec.fields.is_empty() {
            "all fields".dimmed().to_string()
        } else {
            spec.fields.join(", ")
        };
        println!("{} {}", name.cyan(), fields);
    }
    Ok(ExitCode::SUCCESS)
}

/// Read a JSON object from a file, or stdin for `-`
fn read_record(input: &Path) -> Result<FieldMap> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(input).context(format!("Failed to read {}", input.display()))?
    };

    let value: Value = serde_json::from_str(&content).context("Input is not valid JSON")?;
    Ok(codec::encode(&value)?)
}

fn render(config: &Config, value: &Value, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json if config.pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Yaml => codec::encode_yaml(value)?,
        OutputFormat::Xml => codec::encode_xml_with_root(value, &config.xml_root)?,
    };
    Ok(text.trim_end().to_string())
}
