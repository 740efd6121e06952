//! Orchestrator for the `update` and `publish` workflows
//!
//! This module coordinates the phases into the two workflows the CLI exposes.
//!
//! **Update**: load the manifest, synchronize the projects listed in the
//! sources selector to their pinned commits, and rewrite all fragments so
//! those projects are built from source while every other project is
//! consumed as a published artifact.
//!
//! **Publish**: load the manifest, synchronize every project to the tip of
//! the integration branch, rewrite all fragments with every project local
//! and a publication block per project, publish each project in order, and
//! record the new commits in the manifest. With `no_build`, stop right
//! before publishing.

use log::{info, warn};

use super::rewrite::{self, Fragment};
use super::synchronize::{self, Selection};
use super::{publish, SyncedProject};
use crate::build::BuildTool;
use crate::error::Result;
use crate::manifest::{Manifest, Project};
use crate::names;
use crate::repository::Synchronizer;
use crate::workspace::Workspace;

/// Result of an update run.
#[derive(Debug)]
pub struct UpdateReport {
    /// Projects built from source, in manifest order.
    pub locals: Vec<SyncedProject>,
    /// Projects consumed as published artifacts, in manifest order.
    pub remotes: Vec<Project>,
    /// Every fragment written.
    pub fragments: Vec<Fragment>,
    /// Names in the sources selector that are not in the manifest.
    pub ignored_sources: Vec<String>,
}

/// How a publish run ended.
#[derive(Debug)]
pub enum PublishOutcome {
    /// Every project was published and the manifest records the new commits.
    Committed(Vec<SyncedProject>),
    /// Publishing was skipped; fragments are written, the manifest is not.
    Skipped(Vec<SyncedProject>),
}

impl PublishOutcome {
    pub fn projects(&self) -> &[SyncedProject] {
        match self {
            PublishOutcome::Committed(projects) | PublishOutcome::Skipped(projects) => projects,
        }
    }
}

/// Execute the update workflow.
pub fn execute_update(workspace: &Workspace, synchronizer: &Synchronizer) -> Result<UpdateReport> {
    let manifest = Manifest::load(workspace.manifest_path())?;
    let sources = names::read_optional(workspace.sources_path())?.unwrap_or_default();

    let ignored_sources: Vec<String> = sources
        .iter()
        .filter(|name| !manifest.contains(name))
        .cloned()
        .collect();
    for name in &ignored_sources {
        warn!("Ignoring source '{}': not in the manifest", name);
    }

    let (selected, remotes): (Vec<&Project>, Vec<&Project>) = manifest
        .projects()
        .iter()
        .partition(|project| sources.contains(&project.name));
    info!(
        "Update: {} local, {} remote projects",
        selected.len(),
        remotes.len()
    );

    let locals = synchronize::execute(workspace, selected, Selection::Pinned, synchronizer)?;
    let fragments = rewrite::execute(workspace, manifest.projects(), &locals)?;

    Ok(UpdateReport {
        locals,
        remotes: remotes.into_iter().cloned().collect(),
        fragments,
        ignored_sources,
    })
}

/// Execute the publish workflow.
///
/// Returns `Err(Error::Build)` when a publish step fails; in that case the
/// working copies and fragments stay as rewritten and the manifest is left
/// unchanged.
pub fn execute_publish(
    workspace: &Workspace,
    synchronizer: &Synchronizer,
    build_tool: &dyn BuildTool,
    no_build: bool,
) -> Result<PublishOutcome> {
    let manifest = Manifest::load(workspace.manifest_path())?;

    info!("Publish: synchronizing {} projects", manifest.projects().len());
    let synced = synchronize::execute(
        workspace,
        manifest.projects(),
        Selection::Latest,
        synchronizer,
    )?;

    info!("Publish: rewriting fragments");
    let mut fragments = rewrite::plan(workspace, manifest.projects(), &synced)?;
    publish::append_publications(workspace, &mut fragments, &synced);
    rewrite::write(&fragments)?;

    if no_build {
        info!("Publish: skipped (no build)");
        return Ok(PublishOutcome::Skipped(synced));
    }

    publish::publish_all(workspace, &synced, build_tool)?;
    publish::commit(workspace, &synced)?;
    Ok(PublishOutcome::Committed(synced))
}
