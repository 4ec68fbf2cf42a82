//! Bazel target descriptors
//!
//! A native extension module is identified by a Bazel label such as
//! `//mazegen/cc/python:_core`. The descriptor parses the label once and
//! derives the on-disk package path plus the extension name the packaging
//! layer uses to place the built artifact.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while parsing a Bazel target label
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// Label does not start with the workspace-root marker
    #[error("target label `{0}` must start with `//`")]
    MissingRootMarker(String),

    /// Label does not contain exactly one `:` separator
    #[error("target label `{0}` must contain exactly one `:` between package and name")]
    MalformedLabel(String),
}

/// One native build target, parsed from a `//package/path:name` label.
///
/// The derived fields are computed at construction and never change. The
/// label always uses `/` separators; the derived paths use the host's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BazelTarget {
    qualifier: String,
    relative_path: PathBuf,
    target_name: String,
    ext_name: PathBuf,
}

impl BazelTarget {
    /// Parse a Bazel label of the form `//<package-path>:<name>`.
    ///
    /// # Errors
    ///
    /// Returns `TargetError` when the label lacks the leading `//` or does
    /// not contain exactly one `:`. Both are configuration mistakes in the
    /// caller's target list, not conditions to recover from.
    pub fn parse(qualifier: &str) -> Result<Self, TargetError> {
        let stripped = qualifier
            .strip_prefix("//")
            .ok_or_else(|| TargetError::MissingRootMarker(qualifier.to_string()))?;

        let mut parts = stripped.split(':');
        let (Some(package), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(TargetError::MalformedLabel(qualifier.to_string()));
        };

        let relative_path: PathBuf = package.split('/').collect();
        let ext_name = relative_path.join(name);

        Ok(Self {
            qualifier: qualifier.to_string(),
            relative_path,
            target_name: name.to_string(),
            ext_name,
        })
    }

    /// The full label, exactly as handed to `bazel build`.
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    /// Package path relative to the workspace root, with host separators.
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// The target name after the `:`.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Extension identity exposed to the packaging layer: the package path
    /// joined with the target name. Callers treat this as opaque.
    pub fn ext_name(&self) -> &Path {
        &self.ext_name
    }
}

impl std::fmt::Display for BazelTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.qualifier)
    }
}
