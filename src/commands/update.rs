//! # Update Command Implementation
//!
//! This module implements the `update` subcommand, which prepares a workspace
//! for local development on a subset of projects.
//!
//! ## Functionality
//!
//! - **Selection**: the projects named in the sources file (`sources` by
//!   default) are built from source; every other manifest project is consumed
//!   as the artifact published at its pinned commit.
//!
//! - **Synchronization**: selected projects are cloned into `libs/<name>` or
//!   fetched, then checked out at the commit pinned in the manifest.
//!
//! - **Rewriting**: the settings, application and per-project Gradle
//!   fragments are regenerated to match the selection.
//!
//! The manifest itself is never modified by `update`.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use radar::output::{Marker, OutputConfig};
use radar::phases::orchestrator;
use radar::repository::Synchronizer;
use radar::workspace::{Workspace, DEFAULT_SOURCES};

/// Check out local sources and rewrite dependency fragments
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// File listing the projects to build from source, one per line,
    /// relative to the workspace root.
    #[arg(long, value_name = "FILE", env = "RADAR_SOURCES", default_value = DEFAULT_SOURCES)]
    pub sources: PathBuf,
}

/// Execute the `update` command.
pub fn execute(args: UpdateArgs, workspace: Workspace, output: &OutputConfig) -> Result<()> {
    let workspace = workspace.with_sources(&args.sources);
    let synchronizer = Synchronizer::new(workspace.integration_branch());

    println!(
        "{} Updating workspace {}",
        output.marker(Marker::Sync),
        workspace.root().display()
    );

    let report = match orchestrator::execute_update(&workspace, &synchronizer) {
        Ok(report) => report,
        Err(e) => {
            println!("{} Update failed", output.marker(Marker::Failure));
            return Err(e.into());
        }
    };

    for name in &report.ignored_sources {
        println!(
            "{} '{}' is listed in {} but not in the manifest",
            output.marker(Marker::Warning),
            name,
            workspace.sources_path().display()
        );
    }
    for synced in &report.locals {
        println!(
            "{} {} @ {}",
            output.marker(Marker::Local),
            output.project(synced.name()),
            synced.resolved_commit
        );
    }
    for project in &report.remotes {
        println!(
            "{} {} @ {}",
            output.marker(Marker::Remote),
            output.project(&project.name),
            project.commit
        );
    }
    for fragment in &report.fragments {
        println!(
            "{} {}",
            output.marker(Marker::Write),
            fragment.path.display()
        );
    }

    println!(
        "{} {} local, {} remote",
        output.marker(Marker::Success),
        report.locals.len(),
        report.remotes.len()
    );
    Ok(())
}
