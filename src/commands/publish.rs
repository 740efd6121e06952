//! # Publish Command Implementation
//!
//! This module implements the `publish` subcommand:
//!
//! 1. Every manifest project is cloned or updated to the tip of the
//!    integration branch (`develop` by default).
//! 2. All fragments are rewritten with every project built from source, and
//!    each project's fragment gets a Maven publication versioned at its new
//!    commit.
//! 3. Gradle's `publishToMavenLocal` runs once per project, in manifest order.
//!    The first failure stops the run.
//! 4. Only when every project published, the new commits are written to the
//!    manifest.
//!
//! With `--no-build`, steps 3 and 4 are skipped so the generated fragments
//! can be inspected.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use radar::build::{GradleBuildTool, DEFAULT_BUILD_PROGRAM};
use radar::output::{Marker, OutputConfig};
use radar::phases::orchestrator::{self, PublishOutcome};
use radar::repository::Synchronizer;
use radar::workspace::{Workspace, DEFAULT_INTEGRATION_BRANCH};

/// Publish every project and record the new commits
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Synchronize and rewrite fragments, but do not publish or touch the manifest
    #[arg(long)]
    pub no_build: bool,

    /// Branch whose tip is published
    #[arg(long, value_name = "BRANCH", env = "RADAR_BRANCH", default_value = DEFAULT_INTEGRATION_BRANCH)]
    pub branch: String,

    /// Build program, relative to the workspace root unless absolute or a bare
    /// name on PATH
    #[arg(long, value_name = "PROGRAM", env = "RADAR_BUILD_PROGRAM", default_value = DEFAULT_BUILD_PROGRAM)]
    pub build_program: PathBuf,
}

/// Execute the `publish` command.
pub fn execute(args: PublishArgs, workspace: Workspace, output: &OutputConfig) -> Result<()> {
    let workspace = workspace.with_integration_branch(args.branch);
    let synchronizer = Synchronizer::new(workspace.integration_branch());
    let build_tool = GradleBuildTool::new(args.build_program);

    if args.no_build {
        println!(
            "{} No build: nothing will be published",
            output.marker(Marker::Skip)
        );
    }
    println!(
        "{} Publishing from {} in {}",
        output.marker(Marker::Publish),
        workspace.integration_branch(),
        workspace.root().display()
    );

    let outcome = match orchestrator::execute_publish(
        &workspace,
        &synchronizer,
        &build_tool,
        args.no_build,
    ) {
        Ok(outcome) => outcome,
        Err(e) => {
            println!(
                "{} Publish failed; {} was not modified",
                output.marker(Marker::Failure),
                workspace.manifest_path().display()
            );
            return Err(e.into());
        }
    };

    for synced in outcome.projects() {
        println!(
            "{} {} @ {}",
            output.marker(Marker::Local),
            output.project(synced.name()),
            synced.resolved_commit
        );
    }

    match outcome {
        PublishOutcome::Committed(projects) => println!(
            "{} Published {} projects and updated {}",
            output.marker(Marker::Success),
            projects.len(),
            workspace.manifest_path().display()
        ),
        PublishOutcome::Skipped(projects) => println!(
            "{} Rewrote fragments for {} projects; manifest unchanged",
            output.marker(Marker::Success),
            projects.len()
        ),
    }
    Ok(())
}
