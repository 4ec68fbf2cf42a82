//! Build command - rewrite configuration, run Bazel, place artifacts

use anyhow::{Context, Result, bail};
use bazext::builder::{DistLayout, ExtensionBuilder};
use bazext::config::BuildConfig;
use bazext::manifest::Manifest;
use bazext::platform::Platform;
use bazext::python::PythonEnv;
use bazext::target::BazelTarget;
use std::path::{Path, PathBuf};

/// Run the build command: build every requested extension target and copy
/// the artifacts into the dist layout.
pub(crate) fn run(
    targets: &[String],
    manifest_path: &str,
    debug: bool,
    dist_dir: &str,
    build_temp: &str,
    verbose: bool,
) -> Result<()> {
    let platform = Platform::host();

    let manifest = if Path::new(manifest_path).exists() {
        Manifest::load(manifest_path)?
    } else {
        Manifest::default()
    };

    let qualifiers: Vec<String> = if targets.is_empty() {
        manifest.ext_modules.clone()
    } else {
        targets.to_vec()
    };
    if qualifiers.is_empty() {
        bail!("no extension targets given; pass labels or list ext-modules in {manifest_path}");
    }

    let parsed = qualifiers
        .iter()
        .map(|qualifier| BazelTarget::parse(qualifier).map_err(anyhow::Error::from))
        .collect::<Result<Vec<_>>>()?;

    let python = PythonEnv::detect().context("failed to probe the Python interpreter")?;
    let bazel = bazext::find_bazel_executable()?;

    let mut config = BuildConfig::from_env(platform, python, bazel)?;
    config.debug = debug;
    config.verbose = verbose;
    config.build_temp = PathBuf::from(build_temp);
    config.library_dirs = manifest.library_dirs.iter().map(PathBuf::from).collect();

    let layout = DistLayout {
        dist_dir: PathBuf::from(dist_dir),
    };

    let builder = ExtensionBuilder::new(config, platform);
    builder.build_all(&parsed, &layout)?;

    if verbose {
        println!("Built {} extension(s)", parsed.len());
    }

    Ok(())
}
