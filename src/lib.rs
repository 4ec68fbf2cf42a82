//! bazext internal library
//!
//! Builds Bazel-defined native Python extension modules on behalf of a
//! packaging front end: rewrites the workspace manifest for the active
//! environment, renders the interpreter build rule, runs `bazel build` once
//! per target, and copies the produced shared libraries into the package
//! layout.

pub mod bazel;
pub mod build_rule;
pub mod builder;
pub mod config;
pub mod data_files;
pub mod debug;
pub mod manifest;
pub mod paths;
pub mod platform;
pub mod python;
pub mod target;
pub mod workspace;

// Re-export common types for convenience
pub use bazel::{BuildError, Quirk, build_argv, build_target, find_bazel_executable, quirks};
pub use build_rule::render_build_rule;
pub use builder::{DistLayout, ExtPathResolver, ExtensionBuilder};
pub use config::{BuildConfig, ConfigError};
pub use data_files::find_data_files;
pub use debug::{init_debug, is_debug_enabled};
pub use manifest::Manifest;
pub use platform::Platform;
pub use python::{PythonEnv, PythonError, find_python_executable};
pub use target::{BazelTarget, TargetError};
pub use workspace::rewrite_workspace;
