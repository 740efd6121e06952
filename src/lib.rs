//! # Radar
//!
//! This library keeps a set of sibling Gradle library repositories in step.
//! A declarative manifest pins each repository to a commit; radar clones or
//! updates the working copies, rewires the generated Gradle fragments so each
//! project is either built from its local working copy or consumed as a
//! published artifact, and can publish every project and record the new
//! commits back into the manifest.
//!
//! ## Quick Example
//!
//! ```
//! use radar::manifest::Manifest;
//!
//! let manifest = Manifest::parse(r#"
//! git_base_url = "git@github.com:example"
//! proj_list = ["core", "network"]
//!
//! [core]
//! commit = "0a1b2c3"
//!
//! [network]
//! git_name = "android-network"
//! commit = "4d5e6f7"
//! "#).unwrap();
//!
//! assert_eq!(manifest.projects()[1].repo, "git@github.com:example/android-network");
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`)**: the `radar` TOML file, source of truth for
//!   project order, clone URLs and pinned commits.
//! - **Workspace (`workspace`)**: the run configuration every phase receives.
//! - **Synchronization (`repository`, `git`)**: brings working copies to a
//!   pinned commit or to the tip of the integration branch.
//! - **Fragments (`fragment`, `phases::rewrite`)**: generated Gradle files that
//!   point each dependency at a local project or a published artifact.
//! - **Publishing (`build`, `phases::publish`)**: runs Gradle's publish task
//!   per project and commits the new versions to the manifest.
//!
//! ## Execution Flow
//!
//! `phases::orchestrator` runs the workflows:
//!
//! 1.  **Load**: parse the manifest into an ordered project list.
//! 2.  **Synchronize**: clone or update the selected working copies.
//! 3.  **Rewrite**: regenerate every fragment from scratch.
//! 4.  **Publish** (publish workflow only): publish each project, stop at the
//!     first failure, and record new commits only if all succeeded.

pub mod build;
pub mod error;
pub mod fragment;
pub mod git;
pub mod manifest;
pub mod names;
pub mod output;
pub mod phases;
pub mod repository;
pub mod workspace;

#[cfg(test)]
mod manifest_proptest;
#[cfg(test)]
mod rewrite_proptest;
