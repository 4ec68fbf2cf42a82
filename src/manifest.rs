//! Build manifest
//!
//! The CLI-side source of the extension target list: a small TOML document
//! checked in next to the WORKSPACE. A packaging front end embedding the
//! library supplies its targets directly and never reads this file.
//!
//! ```toml
//! ext-modules = [
//!     "//mazegen/cc/python:_defaults",
//!     "//mazegen/cc/python:_random_maze",
//! ]
//! library-dirs = []
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default manifest filename.
pub const DEFAULT_MANIFEST: &str = "bazext.toml";

/// Targets and link settings for one package build.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    /// Bazel labels of the extension modules to build.
    #[serde(default)]
    pub ext_modules: Vec<String>,

    /// Extra library search directories for the Windows linker.
    #[serde(default)]
    pub library_dirs: Vec<String>,
}

impl Manifest {
    /// Load a manifest from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;

        let manifest = toml::from_str(&contents)
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;

        Ok(manifest)
    }
}
