//! Property-based tests for fragment rewriting.

#[cfg(test)]
mod proptest_tests {
    use crate::fragment::{render_dependencies, DependencyRef};
    use crate::manifest::Project;
    use crate::phases::rewrite::{plan, write, FragmentKind};
    use crate::phases::SyncedProject;
    use crate::workspace::Workspace;
    use proptest::collection::vec;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    /// Project count, local flags, and dependency indices per project.
    fn layout() -> impl Strategy<Value = (usize, Vec<bool>, Vec<Vec<usize>>)> {
        (1usize..6).prop_flat_map(|n| (Just(n), vec(any::<bool>(), n), vec(vec(0..n, 0..4), n)))
    }

    fn setup(
        temp_dir: &TempDir,
        n: usize,
        local: &[bool],
        deps: &[Vec<usize>],
    ) -> (Workspace, Vec<Project>, Vec<SyncedProject>) {
        let ws = Workspace::new(temp_dir.path());
        let projects: Vec<Project> = (0..n)
            .map(|i| Project {
                name: format!("p{}", i),
                repo: format!("https://example.com/p{}.git", i),
                commit: format!("pin{}", i),
            })
            .collect();

        let mut locals = Vec::new();
        for (i, project) in projects.iter().enumerate() {
            if !local[i] {
                continue;
            }
            let local_path = ws.checkout_path(&project.name);
            fs::create_dir_all(&local_path).unwrap();
            let list: String = deps[i].iter().map(|d| format!("p{}\n", d)).collect();
            fs::write(ws.dependency_list_path(&local_path), list).unwrap();
            locals.push(SyncedProject {
                project: project.clone(),
                local_path,
                resolved_commit: format!("head{}", i),
            });
        }
        (ws, projects, locals)
    }

    proptest! {
        /// Property: a dependency is a local reference iff it is in the local
        /// set, otherwise a remote reference at its pinned commit
        #[test]
        fn dependencies_follow_partition((n, local, deps) in layout()) {
            let temp_dir = TempDir::new().unwrap();
            let (ws, projects, locals) = setup(&temp_dir, n, &local, &deps);

            let fragments = plan(&ws, &projects, &locals).unwrap();

            for (i, project) in projects.iter().enumerate() {
                let fragment = fragments
                    .iter()
                    .find(|f| f.kind == FragmentKind::Project(project.name.clone()));
                if !local[i] {
                    prop_assert!(fragment.is_none());
                    continue;
                }
                let expected: Vec<DependencyRef> = deps[i]
                    .iter()
                    .map(|&d| {
                        if local[d] {
                            DependencyRef::Local { gradle_path: format!(":libs:p{}", d) }
                        } else {
                            DependencyRef::Remote {
                                group: "com.example".to_string(),
                                name: format!("p{}", d),
                                version: format!("pin{}", d),
                            }
                        }
                    })
                    .collect();
                prop_assert_eq!(&fragment.unwrap().contents, &render_dependencies(&expected));
            }
        }

        /// Property: rewriting twice yields byte-identical fragments
        #[test]
        fn rewrite_is_deterministic((n, local, deps) in layout()) {
            let temp_dir = TempDir::new().unwrap();
            let (ws, projects, locals) = setup(&temp_dir, n, &local, &deps);

            let first = plan(&ws, &projects, &locals).unwrap();
            write(&first).unwrap();
            let on_disk: Vec<String> = first
                .iter()
                .map(|f| fs::read_to_string(&f.path).unwrap())
                .collect();

            let second = plan(&ws, &projects, &locals).unwrap();
            write(&second).unwrap();

            prop_assert_eq!(&first, &second);
            for (fragment, contents) in second.iter().zip(&on_disk) {
                prop_assert_eq!(&fs::read_to_string(&fragment.path).unwrap(), contents);
            }
        }
    }
}
