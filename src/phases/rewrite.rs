//! Phase 3: Rewriting Gradle Fragments
//!
//! Regenerates every fragment that wires the projects together, based on
//! which projects are local for this run:
//!
//! - **Settings fragment** (workspace root): one `include` per local project.
//! - **Application fragment** (`app/`): one dependency per manifest project,
//!   on the local Gradle project or on the published artifact at its pinned
//!   commit.
//! - **Project fragments** (inside each local working copy): the same choice
//!   for every name in the project's `dependencies` file. A project without a
//!   dependency list gets an empty fragment.
//!
//! Fragments are always truncated and rewritten in full, never patched. The
//! output only depends on the manifest order, the local set and the
//! dependency lists, so repeated runs produce identical bytes.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use super::SyncedProject;
use crate::error::{Error, Result};
use crate::fragment::{render_dependencies, render_includes, DependencyRef};
use crate::manifest::Project;
use crate::names;
use crate::workspace::Workspace;

/// Which fragment a [`Fragment`] is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentKind {
    Settings,
    Application,
    Project(String),
}

/// A generated file and its full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub path: PathBuf,
    pub contents: String,
}

/// Computes every fragment without writing anything.
///
/// `projects` is the full manifest in order; `locals` are the synchronized
/// projects built from source in this run. Dependency lists are read from
/// the local working copies.
pub fn plan(
    workspace: &Workspace,
    projects: &[Project],
    locals: &[SyncedProject],
) -> Result<Vec<Fragment>> {
    let local_by_name: HashMap<&str, &SyncedProject> =
        locals.iter().map(|synced| (synced.name(), synced)).collect();
    let pinned: HashMap<&str, &Project> = projects
        .iter()
        .map(|project| (project.name.as_str(), project))
        .collect();
    let local_names: HashSet<&str> = local_by_name.keys().copied().collect();

    let reference = |project: &Project| {
        if local_names.contains(project.name.as_str()) {
            DependencyRef::Local {
                gradle_path: workspace.gradle_path(&project.name),
            }
        } else {
            DependencyRef::Remote {
                group: workspace.group_id().to_string(),
                name: project.name.clone(),
                version: project.commit.clone(),
            }
        }
    };

    let local_in_order: Vec<&SyncedProject> = projects
        .iter()
        .filter_map(|project| local_by_name.get(project.name.as_str()).copied())
        .collect();

    let mut fragments = Vec::with_capacity(2 + local_in_order.len());

    let gradle_paths: Vec<String> = local_in_order
        .iter()
        .map(|synced| workspace.gradle_path(synced.name()))
        .collect();
    fragments.push(Fragment {
        kind: FragmentKind::Settings,
        path: workspace.settings_fragment_path(),
        contents: render_includes(gradle_paths.iter().map(String::as_str)),
    });

    let app_deps: Vec<DependencyRef> = projects.iter().map(reference).collect();
    fragments.push(Fragment {
        kind: FragmentKind::Application,
        path: workspace.app_fragment_path(),
        contents: render_dependencies(&app_deps),
    });

    for synced in local_in_order {
        let list_path = workspace.dependency_list_path(&synced.local_path);
        let contents = match names::read_optional(&list_path)? {
            None => {
                debug!("{} has no dependency list", synced.name());
                String::new()
            }
            Some(dependencies) => {
                let deps = dependencies
                    .iter()
                    .map(|dependency| {
                        pinned
                            .get(dependency.as_str())
                            .map(|&project| reference(project))
                            .ok_or_else(|| Error::Config {
                                message: format!(
                                    "Project '{}' depends on '{}', which is not in the manifest",
                                    synced.name(),
                                    dependency
                                ),
                                hint: Some(format!(
                                    "Add '{}' to proj_list or fix {}",
                                    dependency,
                                    list_path.display()
                                )),
                            })
                    })
                    .collect::<Result<Vec<_>>>()?;
                render_dependencies(&deps)
            }
        };

        fragments.push(Fragment {
            kind: FragmentKind::Project(synced.name().to_string()),
            path: workspace.project_fragment_path(&synced.local_path),
            contents,
        });
    }

    Ok(fragments)
}

/// Writes fragments to disk, truncating existing files.
pub fn write(fragments: &[Fragment]) -> Result<()> {
    for fragment in fragments {
        if let Some(parent) = fragment.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&fragment.path, &fragment.contents)?;
        debug!("Wrote {}", fragment.path.display());
    }
    Ok(())
}

/// Execute Phase 3: plan and write every fragment.
pub fn execute(
    workspace: &Workspace,
    projects: &[Project],
    locals: &[SyncedProject],
) -> Result<Vec<Fragment>> {
    let fragments = plan(workspace, projects, locals)?;
    write(&fragments)?;
    info!(
        "Rewrote {} fragments ({} local, {} remote)",
        fragments.len(),
        locals.len(),
        projects.len().saturating_sub(locals.len())
    );
    Ok(fragments)
}
