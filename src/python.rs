//! Python interpreter discovery and probing
//!
//! Header locations and the interpreter version come from the interpreter
//! itself via `sysconfig` one-liners, the same facts the packaging front end
//! works from. Probing happens once; the result rides along in the build
//! configuration.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Errors raised while locating or probing the interpreter
#[derive(Debug, Error)]
pub enum PythonError {
    /// No usable executable in `PYTHON` or on the `PATH`
    #[error("Python executable not found in PATH or PYTHON environment variable")]
    NotFound,

    /// The interpreter ran but the probe failed
    #[error("failed to probe the Python interpreter: {0}")]
    Probe(String),

    /// `sysconfig` reported a version string that is not `major.minor`
    #[error("unparseable Python version `{0}`")]
    Version(String),
}

/// Facts about the interpreter the extensions are built against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonEnv {
    /// Directory containing `Python.h`.
    pub include_dir: PathBuf,
    /// Interpreter version as `(major, minor)`.
    pub version: (u32, u32),
}

impl PythonEnv {
    /// Probe the active interpreter for its header directory and version.
    ///
    /// # Errors
    ///
    /// Returns `PythonError` when no interpreter can be found or a probe
    /// command fails.
    pub fn detect() -> Result<Self, PythonError> {
        let python = find_python_executable()?;

        let include_dir = PathBuf::from(probe(
            &python,
            "import sysconfig; print(sysconfig.get_paths()['include'])",
        )?);
        let raw_version = probe(
            &python,
            "import sysconfig; print(sysconfig.get_python_version())",
        )?;

        Ok(Self {
            include_dir,
            version: parse_version(&raw_version)?,
        })
    }

    /// `major.minor`, the form `sysconfig.get_python_version()` reports.
    pub fn version_str(&self) -> String {
        format!("{}.{}", self.version.0, self.version.1)
    }
}

/// Locate the Python executable.
///
/// Priority order: `PYTHON` environment variable, then `python3` and
/// `python` on the `PATH`.
///
/// # Errors
///
/// Returns `PythonError::NotFound` when no candidate exists.
pub fn find_python_executable() -> Result<PathBuf, PythonError> {
    if let Ok(python) = env::var("PYTHON") {
        let path = PathBuf::from(python);
        if path.exists() {
            return Ok(path);
        }
    }

    for candidate in ["python3", "python"] {
        if let Ok(output) = Command::new("which").arg(candidate).output()
            && output.status.success()
        {
            let path_str = String::from_utf8_lossy(&output.stdout);
            let path = PathBuf::from(path_str.trim());
            if path.exists() {
                return Ok(path);
            }
        }
    }

    Err(PythonError::NotFound)
}

/// Run one `-c` probe and return its trimmed stdout.
fn probe(python: &Path, script: &str) -> Result<String, PythonError> {
    let output = Command::new(python)
        .args(["-c", script])
        .output()
        .map_err(|e| PythonError::Probe(e.to_string()))?;

    if !output.status.success() {
        return Err(PythonError::Probe(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn parse_version(raw: &str) -> Result<(u32, u32), PythonError> {
    let mut parts = raw.trim().split('.');
    let (Some(major), Some(minor)) = (parts.next(), parts.next()) else {
        return Err(PythonError::Version(raw.to_string()));
    };

    let major = major
        .parse()
        .map_err(|_| PythonError::Version(raw.to_string()))?;
    let minor = minor
        .parse()
        .map_err(|_| PythonError::Version(raw.to_string()))?;

    Ok((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_major_minor_version() {
        assert_eq!(parse_version("3.7").unwrap(), (3, 7));
        assert_eq!(parse_version("3.12").unwrap(), (3, 12));
        assert_eq!(parse_version(" 3.10\n").unwrap(), (3, 10));
    }

    #[test]
    fn parses_version_with_micro_component() {
        // sysconfig reports major.minor, but tolerate a trailing micro.
        assert_eq!(parse_version("3.10.4").unwrap(), (3, 10));
    }

    #[test]
    fn rejects_garbage_versions() {
        assert!(parse_version("3").is_err());
        assert!(parse_version("three.seven").is_err());
        assert!(parse_version("").is_err());
    }

    #[test]
    fn version_str_round_trips() {
        let env = PythonEnv {
            include_dir: PathBuf::from("/opt/x/include/python3.7"),
            version: (3, 7),
        };
        assert_eq!(env.version_str(), "3.7");
    }

    #[test]
    fn detect_probes_a_real_interpreter_when_present() {
        // Interpreter availability varies by environment; only assert on
        // the shape of a successful probe.
        if let Ok(python) = PythonEnv::detect() {
            assert!(!python.include_dir.as_os_str().is_empty());
            assert!(python.version.0 >= 2);
        }
    }
}
