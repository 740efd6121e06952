//! Implementation of the phases of a radar run.
//!
//! ## Overview
//!
//! 1. Manifest loading - [`crate::manifest::Manifest::load`]
//! 2. Synchronization - Clone or update working copies ([`synchronize`])
//! 3. Rewriting - Regenerate every Gradle fragment ([`rewrite`])
//! 4. Publishing - Publish each project and record new commits ([`publish`])
//!
//! Each phase consumes the previous phase's output instead of mutating shared
//! state: loading yields [`Project`]s, synchronization yields
//! [`SyncedProject`]s, rewriting yields [`rewrite::Fragment`]s.
//! [`orchestrator`] wires the phases into the `update` and `publish`
//! workflows.

use std::path::PathBuf;

use crate::manifest::Project;

pub mod orchestrator;
pub mod publish;
pub mod rewrite;
pub mod synchronize;

/// A project whose working copy has been synchronized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedProject {
    /// The project as loaded from the manifest.
    pub project: Project,
    /// Location of the working copy.
    pub local_path: PathBuf,
    /// Commit checked out after synchronization.
    pub resolved_commit: String,
}

impl SyncedProject {
    pub fn name(&self) -> &str {
        &self.project.name
    }
}
