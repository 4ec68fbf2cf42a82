//! Extension build orchestration
//!
//! The linear pipeline the packaging layer drives: rewrite the workspace
//! once, render the build rule once, then build and place each extension in
//! turn. Builds are strictly sequential. Any failure aborts the whole run;
//! artifacts already copied are not rolled back, but the run as a whole is
//! reported failed.

use crate::bazel::{self, BuildError};
use crate::build_rule;
use crate::config::BuildConfig;
use crate::platform::Platform;
use crate::target::BazelTarget;
use crate::workspace;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Maps a built extension to its final location in the package tree.
///
/// Implemented by the packaging layer; [`DistLayout`] covers the standalone
/// CLI case.
pub trait ExtPathResolver {
    /// Destination path for the extension's shared library, keyed by the
    /// target's canonical extension name.
    fn ext_full_path(&self, target: &BazelTarget, platform: Platform) -> PathBuf;
}

/// Plain dist-directory layout: `<dist>/<package-path>/<name><suffix>`.
#[derive(Debug, Clone)]
pub struct DistLayout {
    pub dist_dir: PathBuf,
}

impl ExtPathResolver for DistLayout {
    fn ext_full_path(&self, target: &BazelTarget, platform: Platform) -> PathBuf {
        let mut file_name = target.target_name().to_string();
        file_name.push_str(platform.shared_lib_suffix());
        self.dist_dir.join(target.relative_path()).join(file_name)
    }
}

/// Builds Bazel-defined extension targets and places the artifacts.
#[derive(Debug)]
pub struct ExtensionBuilder {
    config: BuildConfig,
    platform: Platform,
}

impl ExtensionBuilder {
    pub const fn new(config: BuildConfig, platform: Platform) -> Self {
        Self { config, platform }
    }

    /// Run the whole pipeline for `targets`.
    ///
    /// Configuration files are rewritten exactly once, before any build
    /// starts; each target is then built and copied in order.
    pub fn build_all(&self, targets: &[BazelTarget], resolver: &dyn ExtPathResolver) -> Result<()> {
        workspace::rewrite_workspace(&self.config, self.platform)?;
        build_rule::render_build_rule(&self.config, self.platform)?;

        for target in targets {
            self.build_one(target, resolver)?;
        }

        Ok(())
    }

    /// Where Bazel materializes the target's shared library under the
    /// scratch directory.
    pub fn artifact_path(&self, target: &BazelTarget) -> PathBuf {
        let mut file_name = target.target_name().to_string();
        file_name.push_str(self.platform.shared_lib_suffix());

        self.config
            .build_temp
            .join("bazel-bin")
            .join(target.relative_path())
            .join(file_name)
    }

    /// Build one target and copy its artifact into place.
    fn build_one(&self, target: &BazelTarget, resolver: &dyn ExtPathResolver) -> Result<()> {
        if self.config.verbose {
            println!("Building {target}...");
        }

        fs::create_dir_all(&self.config.build_temp).with_context(|| {
            format!(
                "failed to create build directory {}",
                self.config.build_temp.display()
            )
        })?;

        bazel::build_target(&self.config, self.platform, target)?;

        let artifact = self.artifact_path(target);
        if !artifact.exists() {
            return Err(BuildError::ArtifactMissing(artifact).into());
        }

        let dest = resolver.ext_full_path(target, self.platform);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create destination directory {}", parent.display())
            })?;
        }

        fs::copy(&artifact, &dest).with_context(|| {
            format!(
                "failed to copy {} to {}",
                artifact.display(),
                dest.display()
            )
        })?;

        if self.config.verbose {
            println!("  {} -> {}", artifact.display(), dest.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::python::PythonEnv;
    use std::path::Path;

    fn config_with_build_temp(build_temp: PathBuf) -> BuildConfig {
        BuildConfig {
            prefix: PathBuf::from("/opt/x"),
            library_inc: None,
            python: PythonEnv {
                include_dir: PathBuf::from("/opt/x/include/python3.10"),
                version: (3, 10),
            },
            library_dirs: Vec::new(),
            debug: false,
            bazel: PathBuf::from("bazel"),
            workspace: PathBuf::from("WORKSPACE"),
            build_template: PathBuf::from("bazel/python_headers.BUILD.in"),
            build_rule_out: PathBuf::from("bazel/python_headers.BUILD"),
            build_temp,
            verbose: false,
        }
    }

    #[test]
    fn artifact_path_follows_the_bazel_bin_contract() {
        let builder = ExtensionBuilder::new(
            config_with_build_temp(PathBuf::from("scratch")),
            Platform::Unix,
        );
        let target = BazelTarget::parse("//pkg/sub:mod").unwrap();

        let expected: PathBuf = ["scratch", "bazel-bin", "pkg", "sub", "mod.so"]
            .iter()
            .collect();
        assert_eq!(builder.artifact_path(&target), expected);
    }

    #[test]
    fn artifact_path_uses_dll_on_windows() {
        let builder = ExtensionBuilder::new(
            config_with_build_temp(PathBuf::from("scratch")),
            Platform::Windows,
        );
        let target = BazelTarget::parse("//pkg:mod").unwrap();

        assert_eq!(
            builder.artifact_path(&target),
            Path::new("scratch")
                .join("bazel-bin")
                .join("pkg")
                .join("mod.dll")
        );
    }

    #[test]
    fn dist_layout_places_by_package_path() {
        let layout = DistLayout {
            dist_dir: PathBuf::from("dist"),
        };
        let target = BazelTarget::parse("//pkg/sub:mod").unwrap();

        let expected: PathBuf = ["dist", "pkg", "sub", "mod.so"].iter().collect();
        assert_eq!(layout.ext_full_path(&target, Platform::Unix), expected);
    }

    #[test]
    fn dist_layout_uses_the_platform_suffix() {
        let layout = DistLayout {
            dist_dir: PathBuf::from("dist"),
        };
        let target = BazelTarget::parse("//pkg:mod").unwrap();

        assert_eq!(
            layout.ext_full_path(&target, Platform::Windows),
            Path::new("dist").join("pkg").join("mod.dll")
        );
    }
}
