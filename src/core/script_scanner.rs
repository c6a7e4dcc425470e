//! # Script Scanner
//!
//! Lists the `package.json` scripts that match the configured filter.

use crate::{
    constants::{MANIFEST_FILENAME, PRIMARY_SCRIPT},
    core::{commons, pattern},
    models::Manifest,
};
use std::path::Path;

/// Keeps the names accepted by `filter` (script grammar, fully anchored).
pub fn filter_scripts<'a>(names: impl IntoIterator<Item = &'a str>, filter: &str) -> Vec<String> {
    let Some(re) = pattern::compile_script_filter(filter) else {
        return Vec::new();
    };
    names
        .into_iter()
        .filter(|name| re.is_match(name))
        .map(str::to_string)
        .collect()
}

/// Sorts `dev` first, then every other name in ascending order.
pub fn sort_scripts(scripts: &mut [String]) {
    scripts.sort_by(|a, b| (a != PRIMARY_SCRIPT, a).cmp(&(b != PRIMARY_SCRIPT, b)));
}

/// Returns the matching scripts of the manifest in `cwd`, sorted.
///
/// A missing or unparsable manifest, or one without `scripts`, yields an empty list.
pub fn scan_scripts(cwd: &Path, filter: &str) -> Vec<String> {
    let manifest_path = cwd.join(MANIFEST_FILENAME);
    let Some(scripts) = commons::load_json_file::<Manifest>(&manifest_path)
        .loaded()
        .and_then(|manifest| manifest.scripts)
    else {
        return Vec::new();
    };

    let mut matching = filter_scripts(scripts.keys().map(String::as_str), filter);
    sort_scripts(&mut matching);
    log::debug!("Scripts matching '{}': {:?}", filter, matching);
    matching
}

/// Orders candidates for the selection prompt: the last-used script first, then
/// `dev`, then the rest in ascending order.
pub fn order_for_selection(scripts: &[String], last_used: Option<&str>) -> Vec<String> {
    let mut ordered = scripts.to_vec();
    ordered.sort_by(|a, b| {
        let key = |s: &String| (Some(s.as_str()) != last_used, s != PRIMARY_SCRIPT, s.clone());
        key(a).cmp(&key(b))
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn to_names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn project_with_manifest(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), content).unwrap();
        dir
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let project = project_with_manifest(
            r#"{ "scripts": { "predev": "x", "dev:watch": "x", "build": "x", "dev": "x", "dev:api": "x" } }"#,
        );
        assert_eq!(
            scan_scripts(project.path(), "dev*"),
            to_names(&["dev", "dev:api", "dev:watch"])
        );
    }

    #[test]
    fn test_dev_first_for_every_input_order() {
        let inputs = [
            to_names(&["b", "dev", "a"]),
            to_names(&["dev", "b", "a"]),
            to_names(&["a", "b", "dev"]),
        ];
        for mut input in inputs {
            sort_scripts(&mut input);
            assert_eq!(input, to_names(&["dev", "a", "b"]));
        }
    }

    #[test]
    fn test_sort_without_dev_is_lexicographic() {
        let mut names = to_names(&["start", "dev:b", "Dev", "dev:a"]);
        sort_scripts(&mut names);
        assert_eq!(names, to_names(&["Dev", "dev:a", "dev:b", "start"]));
    }

    #[test]
    fn test_missing_or_broken_manifest_is_empty() {
        let empty = TempDir::new().unwrap();
        assert!(scan_scripts(empty.path(), "dev*").is_empty());

        let broken = project_with_manifest("{ \"scripts\": ");
        assert!(scan_scripts(broken.path(), "dev*").is_empty());

        let no_scripts = project_with_manifest(r#"{ "name": "app" }"#);
        assert!(scan_scripts(no_scripts.path(), "dev*").is_empty());
    }

    #[test]
    fn test_custom_filter() {
        let project = project_with_manifest(
            r#"{ "scripts": { "serve": "x", "serve:ssl": "x", "dev": "x" } }"#,
        );
        assert_eq!(
            scan_scripts(project.path(), "serve*"),
            to_names(&["serve", "serve:ssl"])
        );
    }

    #[test]
    fn test_order_for_selection_puts_last_used_first() {
        let scripts = to_names(&["dev", "dev:api", "dev:watch"]);
        assert_eq!(
            order_for_selection(&scripts, Some("dev:watch")),
            to_names(&["dev:watch", "dev", "dev:api"])
        );
        assert_eq!(order_for_selection(&scripts, None), scripts);
        assert_eq!(order_for_selection(&scripts, Some("gone")), scripts);
    }
}
