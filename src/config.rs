//! Build configuration
//!
//! Every environment-derived knob the pipeline needs is collected here once,
//! validated eagerly, and passed into the orchestrator as a plain record.
//! A missing required variable is a configuration error reported up front
//! with every absent name listed, never a silent default and never a failure
//! on first access.

use crate::platform::Platform;
use crate::python::PythonEnv;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// Installation-prefix environment variable.
pub const PREFIX_ENV: &str = "PREFIX";

/// Library-include-directory environment variable; consulted on Windows.
pub const LIBRARY_INC_ENV: &str = "LIBRARY_INC";

/// Workspace manifest rewritten before each build.
pub const DEFAULT_WORKSPACE: &str = "WORKSPACE";

/// Build-rule template and its rendered output.
pub const DEFAULT_BUILD_TEMPLATE: &str = "bazel/python_headers.BUILD.in";
pub const DEFAULT_BUILD_RULE_OUT: &str = "bazel/python_headers.BUILD";

/// Scratch directory Bazel materializes outputs under.
pub const DEFAULT_BUILD_TEMP: &str = "build/bazel-temp";

/// Errors raised while assembling the build configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required environment variables are absent
    #[error("missing required environment variable(s): {}", vars.join(", "))]
    MissingEnv { vars: Vec<String> },
}

/// Everything the build pipeline knows about its environment.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Active installation prefix (`PREFIX`).
    pub prefix: PathBuf,
    /// Library include directory (`LIBRARY_INC`); present on Windows.
    pub library_inc: Option<PathBuf>,
    /// Facts about the interpreter the extensions link against.
    pub python: PythonEnv,
    /// Extra library search directories for the Windows linker.
    pub library_dirs: Vec<PathBuf>,
    /// Build with `--compilation_mode=dbg` instead of `opt`.
    pub debug: bool,
    /// Bazel executable.
    pub bazel: PathBuf,
    /// Workspace manifest rewritten in place before building.
    pub workspace: PathBuf,
    /// Build-rule template (read-only) and its rendered sibling.
    pub build_template: PathBuf,
    pub build_rule_out: PathBuf,
    /// Scratch build-output directory.
    pub build_temp: PathBuf,
    /// Print progress while building.
    pub verbose: bool,
}

impl BuildConfig {
    /// Assemble the configuration from the process environment.
    ///
    /// All required variables are checked up front; `LIBRARY_INC` is only
    /// required on Windows. File locations default to the conventional
    /// workspace layout and can be overridden on the returned value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnv` naming every absent variable.
    pub fn from_env(
        platform: Platform,
        python: PythonEnv,
        bazel: PathBuf,
    ) -> Result<Self, ConfigError> {
        let (prefix, library_inc) = resolve_required(
            platform,
            env::var_os(PREFIX_ENV),
            env::var_os(LIBRARY_INC_ENV),
        )?;

        Ok(Self {
            prefix,
            library_inc,
            python,
            library_dirs: Vec::new(),
            debug: false,
            bazel,
            workspace: PathBuf::from(DEFAULT_WORKSPACE),
            build_template: PathBuf::from(DEFAULT_BUILD_TEMPLATE),
            build_rule_out: PathBuf::from(DEFAULT_BUILD_RULE_OUT),
            build_temp: PathBuf::from(DEFAULT_BUILD_TEMP),
            verbose: false,
        })
    }
}

/// Validate the environment-supplied values, aggregating every missing
/// variable into one error.
fn resolve_required(
    platform: Platform,
    prefix: Option<OsString>,
    library_inc: Option<OsString>,
) -> Result<(PathBuf, Option<PathBuf>), ConfigError> {
    let mut missing = Vec::new();
    if prefix.is_none() {
        missing.push(PREFIX_ENV.to_string());
    }
    if platform.is_windows() && library_inc.is_none() {
        missing.push(LIBRARY_INC_ENV.to_string());
    }

    let Some(prefix) = prefix else {
        return Err(ConfigError::MissingEnv { vars: missing });
    };
    if !missing.is_empty() {
        return Err(ConfigError::MissingEnv { vars: missing });
    }

    Ok((PathBuf::from(prefix), library_inc.map(PathBuf::from)))
}
