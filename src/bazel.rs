//! Bazel invocation
//!
//! Locates the Bazel executable, assembles the argument vector for one
//! target, and runs the build to completion. Version-specific workarounds
//! live in a named quirk list so each one stays independently testable and
//! deletable.

use crate::config::BuildConfig;
use crate::platform::Platform;
use crate::target::BazelTarget;
use std::env;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Errors raised while locating or running Bazel
#[derive(Debug, Error)]
pub enum BuildError {
    /// No usable executable in `BAZEL` or on the `PATH`
    #[error("bazel executable not found in PATH or BAZEL environment variable")]
    BazelNotFound,

    /// The subprocess could not be spawned at all
    #[error("failed to run bazel")]
    Spawn(#[source] std::io::Error),

    /// Bazel ran and reported failure; not retried
    #[error("bazel build of `{target}` failed with {status}")]
    BuildFailed { target: String, status: ExitStatus },

    /// Bazel reported success but the expected output is absent, which
    /// means the artifact path contract is broken
    #[error("build reported success but artifact `{}` was not produced", .0.display())]
    ArtifactMissing(PathBuf),
}

/// Locate the Bazel executable.
///
/// Priority order: `BAZEL` environment variable, then `bazel` on the
/// `PATH`.
///
/// # Errors
///
/// Returns `BuildError::BazelNotFound` when no candidate exists.
pub fn find_bazel_executable() -> Result<PathBuf, BuildError> {
    if let Ok(bazel) = env::var("BAZEL") {
        let path = PathBuf::from(bazel);
        if path.exists() {
            return Ok(path);
        }
    }

    if let Ok(output) = Command::new("which").arg("bazel").output()
        && output.status.success()
    {
        let path_str = String::from_utf8_lossy(&output.stdout);
        let path = PathBuf::from(path_str.trim());
        if path.exists() {
            return Ok(path);
        }
    }

    Err(BuildError::BazelNotFound)
}

/// A narrowly-scoped, removable adjustment to the Bazel argument vector.
#[derive(Debug)]
pub struct Quirk {
    /// Stable name, printed when the quirk fires.
    pub name: &'static str,
    applies: fn(&BuildConfig, Platform) -> bool,
    args: fn(&BuildConfig) -> Vec<String>,
}

impl Quirk {
    /// Whether this quirk fires for the given configuration.
    pub fn applies(&self, config: &BuildConfig, platform: Platform) -> bool {
        (self.applies)(config, platform)
    }

    /// The extra arguments this quirk appends.
    pub fn args(&self, config: &BuildConfig) -> Vec<String> {
        (self.args)(config)
    }
}

/// Python 3.7 on Windows needs the stock `Libs` directory spelled out for
/// the linker. Carried over from the earlier toolchain as-is; delete the
/// entry once no supported interpreter needs it.
const QUIRKS: &[Quirk] = &[Quirk {
    name: "python37-libpath",
    applies: |config, platform| platform.is_windows() && config.python.version == (3, 7),
    args: |_| vec![r"--linkopt=/LIBPATH:C:\Python37\Libs".to_string()],
}];

/// The quirk list, in application order.
pub fn quirks() -> &'static [Quirk] {
    QUIRKS
}

/// Argument vector for `bazel build` of one target.
///
/// Grammar: `build <label> --symlink_prefix=<scratch>/bazel-
/// --compilation_mode=<dbg|opt> [--linkopt=/LIBPATH:<dir>]*` plus any quirk
/// flags.
pub fn build_argv(config: &BuildConfig, platform: Platform, target: &BazelTarget) -> Vec<String> {
    let mut argv = vec![
        "build".to_string(),
        target.qualifier().to_string(),
        format!(
            "--symlink_prefix={}",
            config.build_temp.join("bazel-").display()
        ),
        format!(
            "--compilation_mode={}",
            if config.debug { "dbg" } else { "opt" }
        ),
    ];

    argv.extend(platform.libpath_linkopts(&config.library_dirs));

    for quirk in QUIRKS {
        if quirk.applies(config, platform) {
            crate::debug!("applying quirk {}", quirk.name);
            argv.extend(quirk.args(config));
        }
    }

    argv
}

/// Run `bazel build` for one target, blocking until it finishes.
///
/// Bazel's own output streams straight to the console. A non-zero exit is a
/// hard failure; builds are never retried.
///
/// # Errors
///
/// Returns `BuildError::Spawn` when the process cannot start and
/// `BuildError::BuildFailed` on a non-zero exit.
pub fn build_target(
    config: &BuildConfig,
    platform: Platform,
    target: &BazelTarget,
) -> Result<(), BuildError> {
    let argv = build_argv(config, platform, target);
    crate::debug!("running {} {}", config.bazel.display(), argv.join(" "));

    let status = Command::new(&config.bazel)
        .args(&argv)
        .status()
        .map_err(BuildError::Spawn)?;

    if !status.success() {
        return Err(BuildError::BuildFailed {
            target: target.qualifier().to_string(),
            status,
        });
    }

    Ok(())
}
