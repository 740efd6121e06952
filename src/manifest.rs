//! # Manifest Loading and Write-Back
//!
//! The manifest (`radar` at the workspace root) is a TOML file that pins every
//! sibling repository:
//!
//! ```toml
//! git_base_url = "git@github.com:example"
//! proj_list = ["core", "network"]
//!
//! [core]
//! commit = "0a1b2c3"
//!
//! [network]
//! git_name = "android-network"
//! commit = "4d5e6f7"
//! ```
//!
//! `proj_list` fixes the iteration order for every phase. Each listed name
//! must have a table with a `commit`. The clone URL is
//! `git_base_url/(git_name or name)` when a base URL is configured, and the
//! table's explicit `git_url` otherwise.
//!
//! The publish workflow writes new commits back with [`record_commits`],
//! which keeps every other key in place and replaces the file atomically.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// A project as pinned in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Manifest key; also names the working copy and the published artifact.
    pub name: String,
    /// Resolved clone URL.
    pub repo: String,
    /// Pinned commit or version.
    pub commit: String,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    git_base_url: Option<String>,
    proj_list: Vec<String>,
    #[serde(flatten)]
    entries: toml::Table,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    git_name: Option<String>,
    #[serde(default)]
    git_url: Option<String>,
    #[serde(default)]
    commit: Option<String>,
}

/// The ordered list of projects described by a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    projects: Vec<Project>,
}

impl Manifest {
    /// Reads and resolves the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read manifest '{}': {}", path.display(), e),
            hint: Some("Pass --manifest or run from the workspace root".to_string()),
        })?;
        debug!("Loaded manifest from {}", path.display());
        Self::parse(&content).map_err(|e| match e {
            Error::Config { message, hint } => Error::Config {
                message: format!("{}: {}", path.display(), message),
                hint,
            },
            other => other,
        })
    }

    /// Resolves a manifest from its TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawManifest = toml::from_str(content)
            .map_err(|e| Error::config(format!("Invalid manifest: {}", e.message())))?;

        let base_url = raw.git_base_url.filter(|url| !url.is_empty());
        let mut seen = HashSet::new();
        let mut projects = Vec::with_capacity(raw.proj_list.len());

        for name in &raw.proj_list {
            if !seen.insert(name.as_str()) {
                return Err(Error::config(format!(
                    "Project '{}' is listed twice in proj_list",
                    name
                )));
            }

            let value = raw.entries.get(name).ok_or_else(|| Error::Config {
                message: format!("Project '{}' from proj_list has no table", name),
                hint: Some(format!("Add a [{}] table with a commit", name)),
            })?;
            let entry: RawEntry = value
                .clone()
                .try_into()
                .map_err(|e: toml::de::Error| {
                    Error::config(format!("Invalid table [{}]: {}", name, e.message()))
                })?;

            let repo = match (&base_url, entry.git_url) {
                (Some(base), _) => format!(
                    "{}/{}",
                    base,
                    entry.git_name.as_deref().unwrap_or(name)
                ),
                (None, Some(url)) => url,
                (None, None) => {
                    return Err(Error::Config {
                        message: format!("Cannot resolve a clone URL for '{}'", name),
                        hint: Some(format!(
                            "Set git_base_url or add git_url to the [{}] table",
                            name
                        )),
                    })
                }
            };

            let commit = entry.commit.ok_or_else(|| Error::Config {
                message: format!("Project '{}' has no commit", name),
                hint: Some(format!("Add 'commit = \"...\"' to the [{}] table", name)),
            })?;

            projects.push(Project {
                name: name.clone(),
                repo,
                commit,
            });
        }

        Ok(Self { projects })
    }

    /// Projects in `proj_list` order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Writes `commit` into the `[name]` table of the manifest for every given
/// pair, leaving all other content untouched.
///
/// The new content is formatted with taplo and written to a temporary file
/// next to the manifest, which then replaces it. Either every commit lands
/// or the manifest keeps its previous content.
pub fn record_commits<'a, I>(path: &Path, commits: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let content = fs::read_to_string(path)?;
    let mut table: toml::Table = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Invalid manifest: {}", e.message())))?;

    for (name, commit) in commits {
        let entry = table
            .get_mut(name)
            .and_then(toml::Value::as_table_mut)
            .ok_or_else(|| Error::config(format!("Project '{}' has no table", name)))?;
        entry.insert(
            "commit".to_string(),
            toml::Value::String(commit.to_string()),
        );
    }

    let serialized = toml::to_string(&table)?;
    let formatted = taplo::formatter::format(&serialized, taplo::formatter::Options::default());
    write_atomic(path, &formatted)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.as_file().sync_all()?;
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())?;
    }
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    debug!("Rewrote manifest {}", path.display());
    Ok(())
}
