//! Doctor command - diagnose the extension build environment
//!
//! Checks the required environment variables, the Python interpreter, the
//! Bazel executable, and the configuration files the build rewrites.

use anyhow::{Result, bail};
use bazext::config;
use bazext::platform::Platform;
use bazext::python::PythonEnv;
use std::env;
use std::path::Path;

pub(crate) fn run() -> Result<()> {
    println!("Checking extension build environment...");
    println!();

    let platform = Platform::host();
    let mut has_errors = false;

    if env::var_os(config::PREFIX_ENV).is_some() {
        println!("{} is set", config::PREFIX_ENV);
    } else {
        eprintln!("{} is not set", config::PREFIX_ENV);
        has_errors = true;
    }

    if platform.is_windows() {
        if env::var_os(config::LIBRARY_INC_ENV).is_some() {
            println!("{} is set", config::LIBRARY_INC_ENV);
        } else {
            eprintln!("{} is not set", config::LIBRARY_INC_ENV);
            has_errors = true;
        }
    }

    match PythonEnv::detect() {
        Ok(python) => println!(
            "Python {} found (headers: {})",
            python.version_str(),
            python.include_dir.display()
        ),
        Err(err) => {
            eprintln!("Python interpreter not usable: {err}");
            has_errors = true;
        }
    }

    match bazext::find_bazel_executable() {
        Ok(path) => println!("Bazel found at {}", path.display()),
        Err(err) => {
            eprintln!("{err}");
            has_errors = true;
        }
    }

    for file in [config::DEFAULT_WORKSPACE, config::DEFAULT_BUILD_TEMPLATE] {
        if Path::new(file).exists() {
            println!("{file} found");
        } else {
            eprintln!("{file} not found");
            has_errors = true;
        }
    }

    println!();
    if has_errors {
        bail!("environment is not ready to build extensions");
    }

    println!("No problems found");
    Ok(())
}
