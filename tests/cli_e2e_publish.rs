//! End-to-end tests for the `publish` command.
//!
//! `publish` clones every manifest project, so all of these tests need the
//! system `git` and are gated behind the `integration-tests` feature. The
//! build program is replaced with `true` or `false`.

mod common;
use common::prelude::*;

struct PublishFixture {
    fixture: TestFixture,
    core: GitRemote,
    ui: GitRemote,
    manifest: String,
}

fn publish_fixture() -> PublishFixture {
    let core = GitRemote::new(&[]);
    let ui = GitRemote::new(&[("dependencies", "core\n")]);
    let manifest = format!(
        r#"proj_list = ["core", "ui"]

[core]
git_url = "{}"
commit = "{}"

[ui]
git_url = "{}"
commit = "{}"
"#,
        core.url(),
        core.main_commit,
        ui.url(),
        ui.main_commit
    );
    PublishFixture {
        fixture: TestFixture::new().with_manifest(&manifest),
        core,
        ui,
        manifest,
    }
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_publish_records_integration_branch_commits() {
    let f = publish_fixture();

    f.fixture
        .command()
        .args(["publish", "--build-program", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published 2 projects"));

    let manifest = f.fixture.read("radar");
    assert!(manifest.contains(&format!("\"{}\"", f.core.develop_commit)));
    assert!(manifest.contains(&format!("\"{}\"", f.ui.develop_commit)));
    assert!(!manifest.contains(&f.core.main_commit));
    // URLs survive the rewrite
    assert!(manifest.contains(&f.core.url()));

    assert_eq!(
        f.fixture.read("internal_dependencies.gradle"),
        "include ':libs:core'\ninclude ':libs:ui'\n"
    );
    let ui_fragment = f.fixture.read("libs/ui/internal_dependencies.gradle");
    assert!(ui_fragment.starts_with("dependencies {\n\timplementation project(':libs:core')\n}\n"));
    assert!(ui_fragment.contains("apply plugin: 'maven-publish'"));
    assert!(ui_fragment.contains(&format!("version = \"{}\"", f.ui.develop_commit)));
    assert!(ui_fragment.contains("artifactId \"ui\""));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_publish_failure_leaves_manifest_untouched() {
    let f = publish_fixture();

    f.fixture
        .command()
        .args(["publish", "--build-program", "false"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("was not modified"))
        .stderr(predicate::str::contains("Publish failed for 'core'"));

    assert_eq!(f.fixture.read("radar"), f.manifest);
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_publish_no_build_rewrites_fragments_only() {
    let f = publish_fixture();

    f.fixture
        .command()
        .args(["publish", "--no-build", "--build-program", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("manifest unchanged"));

    assert_eq!(f.fixture.read("radar"), f.manifest);
    let core_fragment = f.fixture.read("libs/core/internal_dependencies.gradle");
    assert!(core_fragment.contains(&format!("version = \"{}\"", f.core.develop_commit)));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_publish_unknown_branch_fails() {
    let f = publish_fixture();

    f.fixture
        .command()
        .args(["publish", "--branch", "release", "--build-program", "true"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to synchronize 'core'"));

    assert_eq!(f.fixture.read("radar"), f.manifest);
}

/// Clones of a remote whose default branch is `develop` already have a local
/// `develop` branch.
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_publish_when_remote_head_is_develop() {
    let core = GitRemote::with_head(&[], "develop");
    let manifest = format!(
        "proj_list = [\"core\"]\n\n[core]\ngit_url = \"{}\"\ncommit = \"{}\"\n",
        core.url(),
        core.main_commit
    );
    let fixture = TestFixture::new().with_manifest(&manifest);

    fixture
        .command()
        .args(["publish", "--build-program", "true"])
        .assert()
        .success();
    // Second run goes through the existing working copy
    fixture
        .command()
        .args(["publish", "--build-program", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "core @ {}",
            core.develop_commit
        )));

    assert!(fixture
        .read("radar")
        .contains(&format!("\"{}\"", core.develop_commit)));
}
