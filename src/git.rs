//! Wrappers around the system `git` binary.
//!
//! Using the system command means SSH keys, credential helpers and anything
//! else configured in `~/.gitconfig` work without extra setup.

use std::fs;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::Error;

/// Run `git <args>` inside `dir` and return its trimmed stdout.
fn run(dir: &Path, args: &[&str]) -> Result<String, Error> {
    debug!("git {} (in {})", args.join(" "), dir.display());

    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| Error::GitCommand {
            command: args.join(" "),
            dir: dir.display().to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command: args.join(" "),
            dir: dir.display().to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Clone `url` into `target_dir`, creating parent directories as needed.
pub fn clone(url: &str, target_dir: &Path) -> Result<(), Error> {
    let parent = match target_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let target = target_dir.to_string_lossy();
    run(parent, &["clone", url, &target]).map_err(|e| match e {
        Error::GitCommand { command, dir, stderr } => {
            // Provide a helpful message for common auth failures
            let stderr = if stderr.contains("Authentication failed")
                || stderr.contains("Permission denied")
                || stderr.contains("Could not read from remote repository")
            {
                format!(
                    "{}\nMake sure you have access to the repository \
                     (SSH key in ssh-agent, credential helper or access token).",
                    stderr
                )
            } else {
                stderr
            };
            Error::GitCommand {
                command,
                dir,
                stderr,
            }
        }
        other => other,
    })?;
    Ok(())
}

/// Fetch remote updates without touching the working tree.
pub fn fetch(repo_dir: &Path) -> Result<(), Error> {
    run(repo_dir, &["fetch"]).map(|_| ())
}

/// Check out a commit, tag or existing branch.
pub fn checkout(repo_dir: &Path, rev: &str) -> Result<(), Error> {
    run(repo_dir, &["checkout", rev]).map(|_| ())
}

/// Create `branch` from `origin/<branch>` and switch to it.
pub fn checkout_tracking_branch(repo_dir: &Path, branch: &str) -> Result<(), Error> {
    let remote = format!("origin/{}", branch);
    run(repo_dir, &["checkout", "-b", branch, &remote]).map(|_| ())
}

/// Whether a local branch named `branch` exists.
pub fn has_local_branch(repo_dir: &Path, branch: &str) -> Result<bool, Error> {
    let pattern = format!("refs/heads/{}", branch);
    let listed = run(repo_dir, &["for-each-ref", "--format=%(refname)", &pattern])?;
    Ok(listed.lines().any(|line| line == pattern))
}

/// Pull the current branch from its upstream.
pub fn pull(repo_dir: &Path) -> Result<(), Error> {
    run(repo_dir, &["pull"]).map(|_| ())
}

/// Commit hash currently checked out.
pub fn head_commit(repo_dir: &Path) -> Result<String, Error> {
    run(repo_dir, &["rev-parse", "HEAD"])
}
