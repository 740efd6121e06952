//! # Workspace Layout
//!
//! A [`Workspace`] is the explicit configuration of a run: where the manifest
//! lives, where working copies are checked out, which file names the
//! generated Gradle fragments use, and which branch counts as "latest".
//!
//! It is built once by the binary from CLI flags and environment variables
//! and then passed by reference into every phase. No phase derives paths on
//! its own.

use std::path::{Path, PathBuf};

/// Default name of the manifest file at the workspace root.
pub const DEFAULT_MANIFEST: &str = "radar";
/// Default name of the sources selector file at the workspace root.
pub const DEFAULT_SOURCES: &str = "sources";
/// Directory (and Gradle path segment) holding local working copies.
pub const DEFAULT_CHECKOUTS_DIR: &str = "libs";
/// Gradle module that consumes every project.
pub const DEFAULT_APP_MODULE: &str = "app";
/// File name shared by every generated fragment.
pub const DEFAULT_FRAGMENT_NAME: &str = "internal_dependencies.gradle";
/// Per-project dependency list file name.
pub const DEFAULT_DEPENDENCY_LIST: &str = "dependencies";
/// Maven group id used for published artifacts.
pub const DEFAULT_GROUP_ID: &str = "com.example";
/// Branch tracked when no commit is pinned.
pub const DEFAULT_INTEGRATION_BRANCH: &str = "develop";

/// Run configuration shared by every phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
    manifest: PathBuf,
    sources: PathBuf,
    checkouts_dir: String,
    app_module: String,
    fragment_name: String,
    dependency_list_name: String,
    group_id: String,
    integration_branch: String,
}

impl Workspace {
    /// Creates a workspace rooted at `root` with the default layout.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            manifest: root.join(DEFAULT_MANIFEST),
            sources: root.join(DEFAULT_SOURCES),
            root,
            checkouts_dir: DEFAULT_CHECKOUTS_DIR.to_string(),
            app_module: DEFAULT_APP_MODULE.to_string(),
            fragment_name: DEFAULT_FRAGMENT_NAME.to_string(),
            dependency_list_name: DEFAULT_DEPENDENCY_LIST.to_string(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            integration_branch: DEFAULT_INTEGRATION_BRANCH.to_string(),
        }
    }

    /// Overrides the manifest location. Relative paths are resolved against
    /// the workspace root.
    pub fn with_manifest(mut self, manifest: impl AsRef<Path>) -> Self {
        self.manifest = self.root.join(manifest);
        self
    }

    /// Overrides the sources selector location. Relative paths are resolved
    /// against the workspace root.
    pub fn with_sources(mut self, sources: impl AsRef<Path>) -> Self {
        self.sources = self.root.join(sources);
        self
    }

    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }

    pub fn with_integration_branch(mut self, branch: impl Into<String>) -> Self {
        self.integration_branch = branch.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    pub fn sources_path(&self) -> &Path {
        &self.sources
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn integration_branch(&self) -> &str {
        &self.integration_branch
    }

    /// Directory that holds every local working copy.
    pub fn checkouts_dir(&self) -> PathBuf {
        self.root.join(&self.checkouts_dir)
    }

    /// Working copy location for the project `name`.
    pub fn checkout_path(&self, name: &str) -> PathBuf {
        self.checkouts_dir().join(name)
    }

    /// Gradle project path of a local project, e.g. `:libs:core`.
    pub fn gradle_path(&self, name: &str) -> String {
        format!(":{}:{}", self.checkouts_dir, name)
    }

    /// Aggregate fragment holding the `include` directives.
    pub fn settings_fragment_path(&self) -> PathBuf {
        self.root.join(&self.fragment_name)
    }

    /// Aggregate fragment holding the application's dependency block.
    pub fn app_fragment_path(&self) -> PathBuf {
        self.root.join(&self.app_module).join(&self.fragment_name)
    }

    /// Per-project fragment inside a working copy.
    pub fn project_fragment_path(&self, local_path: &Path) -> PathBuf {
        local_path.join(&self.fragment_name)
    }

    /// Dependency list inside a working copy.
    pub fn dependency_list_path(&self, local_path: &Path) -> PathBuf {
        local_path.join(&self.dependency_list_name)
    }
}
