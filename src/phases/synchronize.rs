//! Phase 2: Synchronization
//!
//! Brings the working copy of every selected project under the workspace's
//! checkouts directory, in manifest order, and records the commit each one
//! ends up at. The first failure aborts the phase.

use std::fs;

use log::info;

use super::SyncedProject;
use crate::error::Result;
use crate::manifest::Project;
use crate::repository::{SyncTarget, Synchronizer};
use crate::workspace::Workspace;

/// Which commit each project is synchronized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The commit pinned in the manifest.
    Pinned,
    /// The tip of the integration branch.
    Latest,
}

/// Execute Phase 2 for `projects`, preserving their order.
pub fn execute<'a, I>(
    workspace: &Workspace,
    projects: I,
    selection: Selection,
    synchronizer: &Synchronizer,
) -> Result<Vec<SyncedProject>>
where
    I: IntoIterator<Item = &'a Project>,
{
    let checkouts = workspace.checkouts_dir();
    fs::create_dir_all(&checkouts)?;

    let mut synced = Vec::new();
    for project in projects {
        let local_path = workspace.checkout_path(&project.name);
        let target = match selection {
            Selection::Pinned => SyncTarget::Pinned(project.commit.clone()),
            Selection::Latest => SyncTarget::Latest,
        };
        info!("Synchronizing {} ({:?})", project.name, target);

        let resolved_commit = synchronizer.sync(project, &local_path, &target)?;
        synced.push(SyncedProject {
            project: project.clone(),
            local_path,
            resolved_commit,
        });
    }
    Ok(synced)
}
