//! Phase 4: Publishing
//!
//! Adds a Maven publication block to every project fragment, publishes the
//! projects one at a time in manifest order, and records the published
//! commits in the manifest.
//!
//! Publishing stops at the first failure. The manifest is only rewritten
//! after every project published successfully, so it never names a commit
//! whose artifact was not published.

use log::{info, warn};

use super::rewrite::{Fragment, FragmentKind};
use super::SyncedProject;
use crate::build::BuildTool;
use crate::error::{Error, Result};
use crate::fragment::render_publication;
use crate::manifest;
use crate::workspace::Workspace;

/// Appends a publication block, versioned at the synchronized commit, to the
/// fragment of every project in `synced`.
pub fn append_publications(
    workspace: &Workspace,
    fragments: &mut [Fragment],
    synced: &[SyncedProject],
) {
    for fragment in fragments.iter_mut() {
        let FragmentKind::Project(name) = &fragment.kind else {
            continue;
        };
        if let Some(project) = synced.iter().find(|s| s.name() == name) {
            fragment.contents.push_str(&render_publication(
                workspace.group_id(),
                project.name(),
                &project.resolved_commit,
            ));
        }
    }
}

/// Publishes every project in order, stopping at the first failure.
pub fn publish_all(
    workspace: &Workspace,
    synced: &[SyncedProject],
    build_tool: &dyn BuildTool,
) -> Result<()> {
    for (index, project) in synced.iter().enumerate() {
        info!(
            "Publishing {} ({}/{}) at {}",
            project.name(),
            index + 1,
            synced.len(),
            project.resolved_commit
        );
        let status = build_tool.run_publish(workspace, project)?;
        if !status.success() {
            let remaining = synced.len() - index - 1;
            if remaining > 0 {
                warn!("Skipping {} remaining projects", remaining);
            }
            return Err(Error::Build {
                project: project.name().to_string(),
                message: format!("build tool {}", status),
            });
        }
    }
    Ok(())
}

/// Records every synchronized commit in the manifest.
pub fn commit(workspace: &Workspace, synced: &[SyncedProject]) -> Result<()> {
    manifest::record_commits(
        workspace.manifest_path(),
        synced
            .iter()
            .map(|project| (project.name(), project.resolved_commit.as_str())),
    )?;
    info!(
        "Recorded {} commits in {}",
        synced.len(),
        workspace.manifest_path().display()
    );
    Ok(())
}
