//! The external build tool boundary.
//!
//! Publishing is delegated to Gradle, and its exit status is the only signal
//! the publisher looks at. [`BuildTool`] keeps that boundary narrow so tests
//! can stand in for Gradle without running it.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use log::debug;

use crate::error::{Error, Result};
use crate::phases::SyncedProject;
use crate::workspace::Workspace;

/// Default build program, resolved against the workspace root.
pub const DEFAULT_BUILD_PROGRAM: &str = "./gradlew";
/// Gradle task that publishes a project to the local Maven repository.
pub const PUBLISH_TASK: &str = "publishToMavenLocal";

/// Something that can publish one project.
pub trait BuildTool {
    /// Runs the publish step for `project` and returns its exit status.
    ///
    /// An `Err` means the tool could not be started at all.
    fn run_publish(&self, workspace: &Workspace, project: &SyncedProject) -> Result<ExitStatus>;
}

/// Runs `<program> :libs:<name>:publishToMavenLocal` in the workspace root.
#[derive(Debug, Clone)]
pub struct GradleBuildTool {
    program: PathBuf,
}

impl GradleBuildTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Program path as it will be executed. Relative paths with a directory
    /// component are taken relative to the workspace root; bare names are
    /// looked up on `PATH`.
    pub fn resolve_program(&self, root: &Path) -> PathBuf {
        let has_dir = self.program.components().count() > 1;
        if self.program.is_relative() && has_dir {
            root.join(&self.program)
        } else {
            self.program.clone()
        }
    }

    /// Task argument for `project`.
    pub fn task(workspace: &Workspace, project: &SyncedProject) -> String {
        format!(
            "{}:{}",
            workspace.gradle_path(&project.project.name),
            PUBLISH_TASK
        )
    }
}

impl Default for GradleBuildTool {
    fn default() -> Self {
        Self::new(DEFAULT_BUILD_PROGRAM)
    }
}

impl BuildTool for GradleBuildTool {
    fn run_publish(&self, workspace: &Workspace, project: &SyncedProject) -> Result<ExitStatus> {
        let program = self.resolve_program(workspace.root());
        let task = Self::task(workspace, project);
        debug!("Running {} {}", program.display(), task);

        Command::new(&program)
            .arg(&task)
            .current_dir(workspace.root())
            .status()
            .map_err(|e| Error::Build {
                project: project.project.name.clone(),
                message: format!("failed to start {}: {}", program.display(), e),
            })
    }
}
