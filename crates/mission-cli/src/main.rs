//! Malmo Mission Tool
//!
//! Examples:
//!   malmo-mission init > mission.toml
//!   malmo-mission check mission.toml
//!   malmo-mission render mission.toml --output mission.xml
//!   malmo-mission render mission.toml --compact

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mission_core::{default_mission_toml, Mission, WriteOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Builds and checks Malmo mission documents
#[derive(Parser, Debug)]
#[command(name = "malmo-mission", version)]
#[command(about = "Render Malmo mission files to mission XML")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a mission file to XML
    Render {
        /// Mission TOML file
        file: PathBuf,

        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single line, no indentation
        #[arg(long, conflicts_with = "indent")]
        compact: bool,

        /// Spaces per nesting level
        #[arg(long)]
        indent: Option<usize>,
    },

    /// Validate a mission file without writing anything
    Check {
        /// Mission TOML file
        file: PathBuf,

        /// Treat construction warnings as errors
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Print a starter mission file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli.command)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Render {
            file,
            output,
            compact,
            indent,
        } => {
            let mission = load(&file)?;
            let options = write_options(*mission.write_options(), compact, indent);
            let xml = mission
                .render_with(&options)
                .with_context(|| format!("failed to render {}", file.display()))?;

            match output {
                Some(path) => {
                    fs::write(&path, &xml)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), bytes = xml.len(), "wrote mission");
                }
                None => print!("{}", xml),
            }
        }
        Command::Check {
            file,
            deny_warnings,
        } => {
            let mut mission = load(&file)?;
            mission
                .render()
                .with_context(|| format!("{} is not a valid mission", file.display()))?;

            for warning in mission.warnings() {
                println!("warning: {}", warning);
            }
            if deny_warnings && !mission.warnings().is_empty() {
                bail!(
                    "{} produced {} warning(s)",
                    file.display(),
                    mission.warnings().len()
                );
            }
            println!(
                "ok: {} ({} agent(s), {} warning(s))",
                mission.summary(),
                mission.agents().len(),
                mission.warnings().len()
            );
        }
        Command::Init => print!("{}", default_mission_toml()),
    }
    Ok(())
}

fn load(path: &Path) -> Result<Mission> {
    tracing::debug!(path = %path.display(), "loading mission");
    Mission::from_config_file(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Command-line flags override the file's `[output]` table.
fn write_options(from_file: WriteOptions, compact: bool, indent: Option<usize>) -> WriteOptions {
    if compact {
        return WriteOptions::compact();
    }
    match indent {
        Some(indent) => WriteOptions::pretty(indent),
        None => from_file,
    }
}
