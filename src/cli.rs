//! CLI argument parsing and command dispatch

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use radar::output::OutputConfig;
use radar::workspace::{Workspace, DEFAULT_GROUP_ID, DEFAULT_MANIFEST};

use crate::commands;

/// Radar - Synchronize sibling library repositories and rewire their Gradle dependencies
#[derive(Parser, Debug)]
#[command(name = "radar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Workspace root holding the manifest, sources file and libs/ directory
    #[arg(long, global = true, value_name = "DIR", env = "RADAR_ROOT")]
    root: Option<PathBuf>,

    /// Manifest file, relative to the workspace root
    #[arg(long, global = true, value_name = "FILE", env = "RADAR_MANIFEST", default_value = DEFAULT_MANIFEST)]
    manifest: PathBuf,

    /// Maven group id of published artifacts
    #[arg(long, global = true, value_name = "GROUP", env = "RADAR_GROUP_ID", default_value = DEFAULT_GROUP_ID)]
    group_id: String,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check out the projects listed in `sources` at their pinned commits and
    /// point every other project at its published artifact
    Update(commands::update::UpdateArgs),

    /// Build every project from the integration branch, publish it, and
    /// record the new commits in the manifest
    Publish(commands::publish::PublishArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let workspace = Workspace::new(root)
            .with_manifest(&self.manifest)
            .with_group_id(self.group_id);

        match self.command {
            Commands::Update(args) => commands::update::execute(args, workspace, &output),
            Commands::Publish(args) => commands::publish::execute(args, workspace, &output),
        }
    }
}

/// `RUST_LOG` wins over `--log-level` when set.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
