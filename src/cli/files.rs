//! Expansion of command line inputs into the list of files to lint.

use glob::glob;
use jslint_task::SourceKind;
use jslint_task::config::IncludeConfig;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Expand files, directories and glob patterns
///
/// Files named explicitly are always kept. Files found under a directory or
/// through a glob pattern are kept only when their type is enabled in
/// `[include]`. Order follows the inputs; duplicates are dropped.
pub fn collect_source_files(
    inputs: &[PathBuf],
    include: &IncludeConfig,
) -> Result<Vec<PathBuf>, String> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for input in inputs {
        let found = if input.is_file() {
            vec![input.clone()]
        } else if input.is_dir() {
            let pattern = input.join("**").join("*");
            expand_pattern(&pattern.to_string_lossy(), include)?
        } else if is_glob(&input.to_string_lossy()) {
            expand_pattern(&input.to_string_lossy(), include)?
        } else {
            return Err(format!("{} not found", input.display()));
        };

        for path in found {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn is_glob(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

fn expand_pattern(pattern: &str, include: &IncludeConfig) -> Result<Vec<PathBuf>, String> {
    let entries =
        glob(pattern).map_err(|e| format!("invalid pattern '{}': {}", pattern, e.msg))?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| entry.is_file() && is_included(entry, include))
        .collect();
    paths.sort();
    Ok(paths)
}

fn is_included(path: &Path, include: &IncludeConfig) -> bool {
    SourceKind::from_path(path).is_some_and(|kind| include.includes(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "var a;").unwrap();
        path
    }

    fn names(paths: &[PathBuf], root: &Path) -> Vec<String> {
        paths
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_directory_is_expanded_recursively() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        create_test_file(dir, "b.js");
        create_test_file(dir, "lib/a.js");
        create_test_file(dir, "lib/style.css");
        create_test_file(dir, "index.html");
        create_test_file(dir, "README.md");

        let files = collect_source_files(&[dir.to_path_buf()], &IncludeConfig::default()).unwrap();

        assert_eq!(names(&files, dir), vec!["b.js", "lib/a.js"]);
    }

    #[test]
    fn test_include_flags_select_types() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        create_test_file(dir, "a.js");
        create_test_file(dir, "b.css");
        create_test_file(dir, "c.html");
        let include = IncludeConfig {
            js: false,
            css: true,
            html: true,
        };

        let files = collect_source_files(&[dir.to_path_buf()], &include).unwrap();

        assert_eq!(names(&files, dir), vec!["b.css", "c.html"]);
    }

    #[test]
    fn test_explicit_file_is_always_kept() {
        let temp = TempDir::new().unwrap();
        let path = create_test_file(temp.path(), "notes.txt");

        let files = collect_source_files(&[path.clone()], &IncludeConfig::default()).unwrap();

        assert_eq!(files, vec![path]);
    }

    #[test]
    fn test_glob_pattern() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        create_test_file(dir, "src/a.js");
        create_test_file(dir, "src/b.js");
        create_test_file(dir, "src/c.css");

        let pattern = dir.join("src").join("*");
        let files = collect_source_files(&[pattern], &IncludeConfig::default()).unwrap();

        assert_eq!(names(&files, dir), vec!["src/a.js", "src/b.js"]);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let temp = TempDir::new().unwrap();
        let path = create_test_file(temp.path(), "a.js");

        let files = collect_source_files(
            &[path.clone(), temp.path().to_path_buf()],
            &IncludeConfig::default(),
        )
        .unwrap();

        assert_eq!(files, vec![path]);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.js");

        let err = collect_source_files(&[missing], &IncludeConfig::default()).unwrap_err();

        assert!(err.contains("not found"));
    }

    #[test]
    fn test_glob_without_matches_is_empty() {
        let temp = TempDir::new().unwrap();
        let pattern = temp.path().join("*.js");

        let files = collect_source_files(&[pattern], &IncludeConfig::default()).unwrap();

        assert!(files.is_empty());
    }
}
