//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_manifest(manifests::TWO_PROJECTS);
//! fixture.command().arg("update").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    #[allow(unused_imports)]
    pub use super::GitRemote;
    pub use super::TestFixture;
}

/// Manifest snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    /// Two projects resolved from a base URL.
    pub const TWO_PROJECTS: &str = r#"git_base_url = "https://example.com/libs"
proj_list = ["A", "B"]

[A]
commit = "c1"

[B]
commit = "c2"
"#;

    /// A proj_list entry without a table.
    pub const MISSING_TABLE: &str = r#"git_base_url = "https://example.com/libs"
proj_list = ["A", "ghost"]

[A]
commit = "c1"
"#;

    /// Not TOML at all.
    pub const INVALID_TOML: &str = "proj_list = [unclosed";
}

/// A temporary workspace root.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write the `radar` manifest.
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_file("radar", content)
    }

    /// Write the `sources` selector.
    pub fn with_sources(self, names: &[&str]) -> Self {
        let content: String = names.iter().map(|name| format!("{}\n", name)).collect();
        self.with_file("sources", &content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path().join("radar")
    }

    /// Read a file relative to the workspace root.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e))
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("radar");
        cmd.current_dir(self.path())
            .env_remove("RADAR_ROOT")
            .env_remove("RADAR_MANIFEST")
            .env_remove("RADAR_SOURCES")
            .env_remove("RADAR_GROUP_ID")
            .env_remove("RADAR_BRANCH")
            .env_remove("RADAR_BUILD_PROGRAM")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A local git repository used as a clone remote.
///
/// It has an initial commit on `main` and a `develop` branch one commit
/// ahead, so "pinned" and "latest" resolve to different commits.
#[allow(dead_code)]
pub struct GitRemote {
    dir: assert_fs::TempDir,
    pub main_commit: String,
    pub develop_commit: String,
}

#[allow(dead_code)]
impl GitRemote {
    /// Create a repository with `files` committed on `main`.
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self::with_head(files, "main")
    }

    /// Like [`GitRemote::new`], but HEAD is left on `head`, so clones start
    /// on that branch.
    pub fn with_head(files: &[(&str, &str)], head: &str) -> Self {
        let dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        git(dir.path(), &["init", "-b", "main"]);
        git(dir.path(), &["config", "user.email", "test@example.com"]);
        git(dir.path(), &["config", "user.name", "Test User"]);
        git(dir.path(), &["config", "commit.gpgsign", "false"]);

        dir.child("README.md").write_str("# library\n").unwrap();
        for (path, content) in files {
            dir.child(path).write_str(content).unwrap();
        }
        git(dir.path(), &["add", "."]);
        git(dir.path(), &["commit", "-m", "Initial commit"]);
        let main_commit = git(dir.path(), &["rev-parse", "HEAD"]);

        git(dir.path(), &["checkout", "-b", "develop"]);
        dir.child("CHANGELOG.md").write_str("- next\n").unwrap();
        git(dir.path(), &["add", "."]);
        git(dir.path(), &["commit", "-m", "Work in progress"]);
        let develop_commit = git(dir.path(), &["rev-parse", "HEAD"]);
        git(dir.path(), &["checkout", head]);

        Self {
            dir,
            main_commit,
            develop_commit,
        }
    }

    pub fn url(&self) -> String {
        format!("file://{}", self.dir.path().display())
    }
}

/// Run git in `dir`, panicking on failure, and return trimmed stdout.
fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
