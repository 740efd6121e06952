//! Rendering of generated Gradle fragments.
//!
//! Every function here is pure: the same input always renders the same
//! bytes, with entries in the order they are given.

use std::fmt::Write;

/// A single entry of a `dependencies { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyRef {
    /// A sibling project built from its working copy, by Gradle path.
    Local { gradle_path: String },
    /// A published artifact at a pinned version.
    Remote {
        group: String,
        name: String,
        version: String,
    },
}

/// `include` directives for the settings fragment.
pub fn render_includes<'a, I>(gradle_paths: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for path in gradle_paths {
        let _ = writeln!(out, "include '{}'", path);
    }
    out
}

/// A `dependencies` block with one `implementation` line per entry.
pub fn render_dependencies(deps: &[DependencyRef]) -> String {
    let mut out = String::from("dependencies {\n");
    for dep in deps {
        match dep {
            DependencyRef::Local { gradle_path } => {
                let _ = writeln!(out, "\timplementation project('{}')", gradle_path);
            }
            DependencyRef::Remote {
                group,
                name,
                version,
            } => {
                let _ = writeln!(out, "\timplementation '{}:{}:{}'", group, name, version);
            }
        }
    }
    out.push_str("}\n");
    out
}

/// Maven publication block appended to a project's fragment when publishing.
pub fn render_publication(group: &str, artifact: &str, version: &str) -> String {
    format!(
        r#"
apply plugin: 'maven-publish'

afterEvaluate {{
    publishing {{
        publications {{
            release(MavenPublication) {{
                from components.release
                groupId "{group}"
                artifactId "{artifact}"
                version = "{version}"
            }}
        }}
    }}
}}
"#
    )
}
