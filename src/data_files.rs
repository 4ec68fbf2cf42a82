//! Package data-file discovery
//!
//! Recursively collects files under a package directory whose names match
//! simple shell-style `*` patterns, returning paths relative to the package
//! directory for the packaging layer's data-file manifest.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively find files whose names match any of `patterns`.
///
/// Patterns support `*` as in shell globs (`*.png`, `data-*`, `*maze*`);
/// a pattern without `*` matches exactly. Unreadable entries are skipped.
/// Results are relative to `package_dir` and sorted for determinism.
pub fn find_data_files(package_dir: &Path, patterns: &[&str]) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(package_dir).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if patterns.iter().any(|pattern| matches_pattern(&name, pattern))
            && let Ok(relative) = entry.path().strip_prefix(package_dir)
        {
            paths.push(relative.to_path_buf());
        }
    }

    paths.sort();
    paths
}

/// Shell-style `*` matching, enough for data-file patterns.
fn matches_pattern(name: &str, pattern: &str) -> bool {
    // Exact match (no wildcards)
    if !pattern.contains('*') {
        return name == pattern;
    }

    if pattern.len() >= 2 && pattern.starts_with('*') && pattern.ends_with('*') {
        // *foo* - contains
        let middle = &pattern[1..pattern.len() - 1];
        return !middle.contains('*') && name.contains(middle);
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return name.ends_with(suffix);
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return name.starts_with(prefix);
    }

    // foo*bar - single interior wildcard
    let parts: Vec<&str> = pattern.split('*').collect();
    match (parts.first(), parts.get(1)) {
        (Some(&first), Some(&last)) if parts.len() == 2 => {
            name.len() >= first.len() + last.len()
                && name.starts_with(first)
                && name.ends_with(last)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn package_with_files(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, b"data").unwrap();
        }
        dir
    }

    #[test]
    fn finds_files_by_extension_pattern() {
        let dir = package_with_files(&["maze.png", "readme.md", "assets/wall.png"]);

        let found = find_data_files(dir.path(), &["*.png"]);

        assert_eq!(
            found,
            vec![
                PathBuf::from("assets").join("wall.png"),
                PathBuf::from("maze.png"),
            ]
        );
    }

    #[test]
    fn returns_paths_relative_to_the_package_dir() {
        let dir = package_with_files(&["deep/nested/tree/tiles.png"]);

        let found = find_data_files(dir.path(), &["*.png"]);

        assert_eq!(
            found,
            vec![PathBuf::from("deep").join("nested").join("tree").join("tiles.png")]
        );
    }

    #[test]
    fn multiple_patterns_union_their_matches() {
        let dir = package_with_files(&["a.png", "b.txt", "c.dat"]);

        let found = find_data_files(dir.path(), &["*.png", "*.txt"]);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn empty_patterns_match_nothing() {
        let dir = package_with_files(&["a.png"]);
        assert!(find_data_files(dir.path(), &[]).is_empty());
    }

    #[test]
    fn exact_pattern_matches_only_that_name() {
        assert!(matches_pattern("maze.png", "maze.png"));
        assert!(!matches_pattern("maze.png2", "maze.png"));
    }

    #[test]
    fn prefix_and_suffix_wildcards() {
        assert!(matches_pattern("maze.png", "*.png"));
        assert!(matches_pattern("data-01.bin", "data-*"));
        assert!(!matches_pattern("maze.jpg", "*.png"));
    }

    #[test]
    fn contains_wildcard() {
        assert!(matches_pattern("big_maze_tile.dat", "*maze*"));
        assert!(!matches_pattern("tiles.dat", "*maze*"));
    }

    #[test]
    fn interior_wildcard() {
        assert!(matches_pattern("maze_v2.png", "maze*.png"));
        assert!(!matches_pattern("maze_v2.jpg", "maze*.png"));
    }
}
