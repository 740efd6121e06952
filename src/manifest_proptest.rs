//! Property-based tests for manifest resolution.

#[cfg(test)]
mod proptest_tests {
    use crate::error::Error;
    use crate::manifest::Manifest;
    use proptest::collection::btree_set;
    use proptest::prelude::*;

    fn manifest_text(base: &str, names: &[String], git_name: Option<&str>) -> String {
        let list = names
            .iter()
            .map(|name| format!("\"{}\"", name))
            .collect::<Vec<_>>()
            .join(", ");
        let mut text = format!("git_base_url = \"{}\"\nproj_list = [{}]\n", base, list);
        for (index, name) in names.iter().enumerate() {
            text.push_str(&format!("\n[\"{}\"]\ncommit = \"c{}\"\n", name, index));
            if let Some(git_name) = git_name {
                text.push_str(&format!("git_name = \"{}\"\n", git_name));
            }
        }
        text
    }

    proptest! {
        /// Property: with a base URL, the clone URL is base + "/" + (git_name or name)
        #[test]
        fn clone_url_derives_from_base(
            base in "https://[a-z]{1,8}\\.example/[a-z]{1,8}",
            names in btree_set("[a-z][a-z0-9_-]{0,10}", 1..5),
            git_name in proptest::option::of("[a-z][a-z0-9-]{0,10}"),
        ) {
            let names: Vec<String> = names.into_iter().collect();
            let manifest = Manifest::parse(&manifest_text(&base, &names, git_name.as_deref())).unwrap();

            prop_assert_eq!(manifest.projects().len(), names.len());
            for (project, name) in manifest.projects().iter().zip(&names) {
                let expected = format!("{}/{}", base, git_name.as_deref().unwrap_or(name));
                prop_assert_eq!(&project.name, name);
                prop_assert_eq!(&project.repo, &expected);
            }
        }

        /// Property: a proj_list name without a table always fails with a config error
        #[test]
        fn missing_table_is_config_error(
            names in btree_set("[a-z][a-z0-9_-]{0,10}", 1..5),
            ghost in "[A-Z]{1,6}",
        ) {
            let names: Vec<String> = names.into_iter().collect();
            let mut text = manifest_text("https://example.com", &names, None);
            text = text.replacen("proj_list = [", &format!("proj_list = [\"{}\", ", ghost), 1);

            let result = Manifest::parse(&text);
            let is_config_error = matches!(result, Err(Error::Config { .. }));
            prop_assert!(is_config_error, "expected a config error, got {:?}", result);
        }
    }
}
