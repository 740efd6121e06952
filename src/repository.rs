//! # Working Copy Synchronization
//!
//! This module provides the [`Synchronizer`], which brings a project's local
//! working copy to either its pinned commit or the tip of the integration
//! branch, and reports the commit that ended up checked out.
//!
//! ## Design
//!
//! Git access goes through the [`GitOperations`] trait. The binary uses
//! [`DefaultGitOperations`], which shells out to the system `git`; tests
//! inject mocks that record calls and simulate failures without touching a
//! real repository.
//!
//! ## Behavior
//!
//! | Working copy | Target            | Steps                                                   |
//! |--------------|-------------------|---------------------------------------------------------|
//! | missing      | `Pinned(commit)`  | clone, checkout commit                                  |
//! | missing      | `Latest`          | clone, checkout branch (created from `origin/<branch>` if the clone lacks it) |
//! | present      | `Pinned(commit)`  | fetch, checkout commit, pull if it names a local branch |
//! | present      | `Latest`          | fetch, create branch if missing, checkout branch, pull  |
//!
//! Syncing is never a no-op: an existing copy is always fetched again.

use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::manifest::Project;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    /// Clones `url` into `target_dir`.
    fn clone_repo(&self, url: &str, target_dir: &Path) -> Result<()>;

    /// Fetches remote updates.
    fn fetch(&self, repo_dir: &Path) -> Result<()>;

    /// Checks out a commit or an existing local branch.
    fn checkout(&self, repo_dir: &Path, rev: &str) -> Result<()>;

    /// Creates a local `branch` tracking `origin/<branch>` and switches to it.
    fn checkout_tracking_branch(&self, repo_dir: &Path, branch: &str) -> Result<()>;

    /// Whether a local branch exists.
    fn has_local_branch(&self, repo_dir: &Path, branch: &str) -> Result<bool>;

    /// Pulls the current branch.
    fn pull(&self, repo_dir: &Path) -> Result<()>;

    /// Returns the commit hash checked out (`git rev-parse HEAD`).
    fn head_commit(&self, repo_dir: &Path) -> Result<String>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_repo(&self, url: &str, target_dir: &Path) -> Result<()> {
        crate::git::clone(url, target_dir)
    }

    fn fetch(&self, repo_dir: &Path) -> Result<()> {
        crate::git::fetch(repo_dir)
    }

    fn checkout(&self, repo_dir: &Path, rev: &str) -> Result<()> {
        crate::git::checkout(repo_dir, rev)
    }

    fn checkout_tracking_branch(&self, repo_dir: &Path, branch: &str) -> Result<()> {
        crate::git::checkout_tracking_branch(repo_dir, branch)
    }

    fn has_local_branch(&self, repo_dir: &Path, branch: &str) -> Result<bool> {
        crate::git::has_local_branch(repo_dir, branch)
    }

    fn pull(&self, repo_dir: &Path) -> Result<()> {
        crate::git::pull(repo_dir)
    }

    fn head_commit(&self, repo_dir: &Path) -> Result<String> {
        crate::git::head_commit(repo_dir)
    }
}

/// What a working copy should be synchronized to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncTarget {
    /// A specific commit, tag or branch.
    Pinned(String),
    /// The tip of the integration branch.
    Latest,
}

/// Brings working copies up to date through a [`GitOperations`] backend.
pub struct Synchronizer {
    git_ops: Box<dyn GitOperations>,
    integration_branch: String,
}

impl Synchronizer {
    /// Creates a synchronizer backed by the system `git`.
    pub fn new(integration_branch: impl Into<String>) -> Self {
        Self::with_operations(Box::new(DefaultGitOperations), integration_branch)
    }

    /// Creates a synchronizer with a custom `GitOperations` implementation.
    ///
    /// This is primarily used for testing to inject mock operations.
    pub fn with_operations(
        git_ops: Box<dyn GitOperations>,
        integration_branch: impl Into<String>,
    ) -> Self {
        Self {
            git_ops,
            integration_branch: integration_branch.into(),
        }
    }

    /// Synchronizes `project`'s working copy at `local_path` to `target` and
    /// returns the commit now checked out.
    ///
    /// Any git failure is reported as [`Error::Sync`] naming the project.
    pub fn sync(&self, project: &Project, local_path: &Path, target: &SyncTarget) -> Result<String> {
        self.sync_inner(project, local_path, target)
            .map_err(|e| Error::sync(&project.name, e))
    }

    fn sync_inner(&self, project: &Project, local_path: &Path, target: &SyncTarget) -> Result<String> {
        let git = &self.git_ops;
        let branch = self.integration_branch.as_str();

        if local_path.exists() {
            debug!("Updating existing working copy {}", local_path.display());
            git.fetch(local_path)?;
            match target {
                SyncTarget::Pinned(rev) => {
                    git.checkout(local_path, rev)?;
                    // A branch pin follows the remote branch, not the stale local tip
                    if git.has_local_branch(local_path, rev)? {
                        git.pull(local_path)?;
                    }
                }
                SyncTarget::Latest => {
                    if !git.has_local_branch(local_path, branch)? {
                        git.checkout_tracking_branch(local_path, branch)?;
                    }
                    git.checkout(local_path, branch)?;
                    git.pull(local_path)?;
                }
            }
        } else {
            debug!("Cloning {} into {}", project.repo, local_path.display());
            git.clone_repo(&project.repo, local_path)?;
            match target {
                SyncTarget::Pinned(rev) => git.checkout(local_path, rev)?,
                SyncTarget::Latest => {
                    // The clone already has a local branch for the remote HEAD
                    if git.has_local_branch(local_path, branch)? {
                        git.checkout(local_path, branch)?;
                    } else {
                        git.checkout_tracking_branch(local_path, branch)?;
                    }
                }
            }
        }

        let commit = git.head_commit(local_path)?;
        info!("{} is at {}", project.name, commit);
        Ok(commit)
    }
}
