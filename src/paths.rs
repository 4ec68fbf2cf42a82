//! Path helpers shared across the build pipeline.

use std::path::{Component, Path, PathBuf};

/// Render a path with forward slashes, the separator the build system
/// expects regardless of host.
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/")
}

/// Relative path from `base` to `target`, emitting `..` segments where the
/// two diverge. Purely lexical; neither path is touched on disk.
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base_components: Vec<Component<'_>> = base.components().collect();
    let target_components: Vec<Component<'_>> = target.components().collect();

    let common = base_components
        .iter()
        .zip(target_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in target_components.iter().skip(common) {
        relative.push(component);
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }

    relative
}
