//! Workspace manifest rewriting
//!
//! The Bazel WORKSPACE carries `path = "...",  # <marker>` entries for
//! header repositories whose real locations are only known at build time.
//! Each marker tag anchors exactly one substitution: the quoted string
//! immediately before it is replaced, and everything else in the file is
//! left alone. Markers may appear in any order.
//!
//! Whatever generates the WORKSPACE must carry the marker comments
//! verbatim; they are the structural contract between the two sides.

use crate::config::{BuildConfig, LIBRARY_INC_ENV};
use crate::paths::to_forward_slashes;
use crate::platform::Platform;
use anyhow::{Context, Result, anyhow};
use regex::Regex;
use std::fs;

/// Marker for the interpreter-header repository path.
pub const PYTHON_HEADERS_MARKER: &str = "# python headers placeholder";

/// Marker for the pybind11 header repository path.
pub const PYBIND11_HEADERS_MARKER: &str = "# pybind11 placeholder";

/// Marker for the Abseil header repository path.
pub const ABSL_HEADERS_MARKER: &str = "# absl placeholder";

/// One marker-anchored rewrite: the tag plus the resolver computing its
/// replacement path.
struct Substitution {
    marker: &'static str,
    resolve: fn(&BuildConfig, Platform) -> Result<String>,
}

const SUBSTITUTIONS: &[Substitution] = &[
    Substitution {
        marker: PYTHON_HEADERS_MARKER,
        resolve: python_headers_path,
    },
    Substitution {
        marker: PYBIND11_HEADERS_MARKER,
        resolve: library_include_path,
    },
    Substitution {
        marker: ABSL_HEADERS_MARKER,
        resolve: library_include_path,
    },
];

fn python_headers_path(config: &BuildConfig, _platform: Platform) -> Result<String> {
    Ok(to_forward_slashes(&config.prefix))
}

/// On Windows the support headers live under `LIBRARY_INC`; elsewhere under
/// `<prefix>/include`.
fn library_include_path(config: &BuildConfig, platform: Platform) -> Result<String> {
    if platform.is_windows() {
        let dir = config
            .library_inc
            .as_deref()
            .ok_or_else(|| anyhow!("{LIBRARY_INC_ENV} is required on Windows"))?;
        Ok(to_forward_slashes(dir))
    } else {
        Ok(to_forward_slashes(&config.prefix.join("include")))
    }
}

/// Compute the ordered `(marker, value)` pairs for this configuration.
pub fn resolve_substitutions(
    config: &BuildConfig,
    platform: Platform,
) -> Result<Vec<(&'static str, String)>> {
    SUBSTITUTIONS
        .iter()
        .map(|sub| Ok((sub.marker, (sub.resolve)(config, platform)?)))
        .collect()
}

/// Replace the quoted path preceding each marker tag.
///
/// Anchored purely on the trailing marker, so unrelated quoted strings are
/// untouched and re-running with the same values yields identical output.
pub fn substitute(text: &str, replacements: &[(&str, String)]) -> Result<String> {
    let mut rewritten = text.to_string();

    for (marker, value) in replacements {
        let pattern = format!(r#"(path = ")[^"]*(",\s*{})"#, regex::escape(marker));
        let re = Regex::new(&pattern).context("invalid placeholder pattern")?;

        rewritten = re
            .replace_all(&rewritten, |caps: &regex::Captures<'_>| {
                format!("{}{}{}", &caps[1], value, &caps[2])
            })
            .into_owned();
    }

    Ok(rewritten)
}

/// Rewrite the workspace manifest in place with environment-resolved paths.
///
/// Whole-file read, substitute, whole-file rewrite; run once per build
/// invocation before any target is built.
pub fn rewrite_workspace(config: &BuildConfig, platform: Platform) -> Result<()> {
    let contents = fs::read_to_string(&config.workspace).with_context(|| {
        format!(
            "failed to read workspace manifest {}",
            config.workspace.display()
        )
    })?;

    let replacements = resolve_substitutions(config, platform)?;
    let rewritten = substitute(&contents, &replacements)?;

    fs::write(&config.workspace, rewritten).with_context(|| {
        format!(
            "failed to rewrite workspace manifest {}",
            config.workspace.display()
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::python::PythonEnv;
    use std::path::PathBuf;

    fn sample_workspace() -> String {
        r#"workspace(name = "mazegen")

new_local_repository(
    name = "python_headers",
    path = "/usr/include/python3.6",  # python headers placeholder
    build_file = "@//bazel:python_headers.BUILD",
)

new_local_repository(
    name = "absl_headers",
    path = "/old/include",  # absl placeholder
    build_file = "@//bazel:absl_headers.BUILD",
)

new_local_repository(
    name = "pybind11_headers",
    path = "/old/include",  # pybind11 placeholder
    build_file = "@//bazel:pybind11_headers.BUILD",
)

local_repository(
    name = "unrelated",
    path = "third_party/unrelated",
)
"#
        .to_string()
    }

    fn unix_config(prefix: &str) -> BuildConfig {
        BuildConfig {
            prefix: PathBuf::from(prefix),
            library_inc: None,
            python: PythonEnv {
                include_dir: PathBuf::from(prefix).join("include/python3.10"),
                version: (3, 10),
            },
            library_dirs: Vec::new(),
            debug: false,
            bazel: PathBuf::from("bazel"),
            workspace: PathBuf::from("WORKSPACE"),
            build_template: PathBuf::from("bazel/python_headers.BUILD.in"),
            build_rule_out: PathBuf::from("bazel/python_headers.BUILD"),
            build_temp: PathBuf::from("build/bazel-temp"),
            verbose: false,
        }
    }

    #[test]
    fn resolves_all_three_markers_on_unix() {
        let config = unix_config("/opt/x");
        let replacements = resolve_substitutions(&config, Platform::Unix).unwrap();

        assert_eq!(
            replacements,
            vec![
                (PYTHON_HEADERS_MARKER, "/opt/x".to_string()),
                (PYBIND11_HEADERS_MARKER, "/opt/x/include".to_string()),
                (ABSL_HEADERS_MARKER, "/opt/x/include".to_string()),
            ]
        );
    }

    #[test]
    fn windows_resolves_support_headers_from_library_inc() {
        let mut config = unix_config("C:/conda");
        config.library_inc = Some(PathBuf::from("C:/conda/Library/include"));

        let replacements = resolve_substitutions(&config, Platform::Windows).unwrap();

        assert_eq!(replacements[1].1, "C:/conda/Library/include");
        assert_eq!(replacements[2].1, "C:/conda/Library/include");
    }

    #[test]
    fn windows_without_library_inc_is_an_error() {
        let config = unix_config("C:/conda");
        assert!(resolve_substitutions(&config, Platform::Windows).is_err());
    }

    #[test]
    fn substitute_rewrites_each_marked_path() {
        let config = unix_config("/opt/x");
        let replacements = resolve_substitutions(&config, Platform::Unix).unwrap();

        let rewritten = substitute(&sample_workspace(), &replacements).unwrap();

        assert!(rewritten.contains(r#"path = "/opt/x",  # python headers placeholder"#));
        assert!(rewritten.contains(r#"path = "/opt/x/include",  # absl placeholder"#));
        assert!(rewritten.contains(r#"path = "/opt/x/include",  # pybind11 placeholder"#));
    }

    #[test]
    fn substitute_leaves_unmarked_paths_alone() {
        let config = unix_config("/opt/x");
        let replacements = resolve_substitutions(&config, Platform::Unix).unwrap();

        let rewritten = substitute(&sample_workspace(), &replacements).unwrap();

        assert!(rewritten.contains(r#"path = "third_party/unrelated","#));
    }

    #[test]
    fn substitution_is_idempotent() {
        let config = unix_config("/opt/x");
        let replacements = resolve_substitutions(&config, Platform::Unix).unwrap();

        let once = substitute(&sample_workspace(), &replacements).unwrap();
        let twice = substitute(&once, &replacements).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn marker_order_does_not_matter() {
        // The sample lists absl before pybind11; resolution order is
        // python, pybind11, absl. Both must land regardless.
        let config = unix_config("/opt/x");
        let replacements = resolve_substitutions(&config, Platform::Unix).unwrap();

        let rewritten = substitute(&sample_workspace(), &replacements).unwrap();

        assert_eq!(rewritten.matches("/opt/x/include").count(), 2);
    }

    #[test]
    fn rewrite_workspace_round_trips_through_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let workspace = dir.path().join("WORKSPACE");
        fs::write(&workspace, sample_workspace()).unwrap();

        let mut config = unix_config("/opt/x");
        config.workspace = workspace.clone();

        rewrite_workspace(&config, Platform::Unix).unwrap();

        let contents = fs::read_to_string(&workspace).unwrap();
        assert!(contents.contains(r#"path = "/opt/x",  # python headers placeholder"#));
    }
}
