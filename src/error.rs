//! # Error Handling
//!
//! This module defines the centralized error type for `radar`. It uses the
//! `thiserror` library to describe every failure a run can hit, with enough
//! context (project name, manifest path, git command) to act on the message.
//!
//! ## Taxonomy
//!
//! - **`Config`**: the manifest is structurally invalid, a required field is
//!   missing, or a dependency name cannot be resolved against the manifest.
//! - **`Sync`**: a version-control operation failed while bringing a
//!   project's working copy up to date. Wraps the underlying `GitCommand`.
//! - **`Build`**: the external build tool returned a non-zero status (or
//!   could not be started) while publishing a project.
//!
//! Nothing is recovered internally: every error propagates to the binary,
//! which reports it and exits with a non-zero status.

use thiserror::Error;

/// Main error type for radar operations
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest, the sources selector or a dependency list is invalid.
    ///
    /// Includes an optional hint about how to fix it.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A git invocation exited unsuccessfully or could not be started.
    #[error("Git command failed in {dir}: git {command} - {stderr}")]
    GitCommand {
        command: String,
        dir: String,
        stderr: String,
    },

    /// Synchronizing a project's working copy failed.
    #[error("Failed to synchronize '{project}': {source}")]
    Sync {
        project: String,
        #[source]
        source: Box<Error>,
    },

    /// Publishing a project through the build tool failed.
    #[error("Publish failed for '{project}': {message}")]
    Build { project: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest could not be serialized back to TOML.
    #[error("Manifest serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Shorthand for a [`Error::Config`] without a hint.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            hint: None,
        }
    }

    /// Wraps a lower-level failure as a [`Error::Sync`] for `project`.
    pub fn sync(project: &str, source: Error) -> Self {
        Error::Sync {
            project: project.to_string(),
            source: Box::new(source),
        }
    }

    /// The project this error is attributed to, if any.
    pub fn project(&self) -> Option<&str> {
        match self {
            Error::Sync { project, .. } | Error::Build { project, .. } => Some(project),
            _ => None,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
