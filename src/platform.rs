//! Platform strategy
//!
//! The Windows/macOS/Unix differences in the build pipeline are decided here
//! once, behind a single strategy value selected at startup. The pipeline
//! itself never branches on `cfg` or `env::consts`.

use std::env;
use std::path::PathBuf;

/// The host-dependent capability set: artifact suffix, link-library line,
/// and linker search-path flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows (MSVC toolchain, `.dll` artifacts, `/LIBPATH` link flags)
    Windows,
    /// macOS (extensions must link the interpreter's shared library)
    MacOs,
    /// Linux and other Unix-likes
    Unix,
}

impl Platform {
    /// Select the strategy for the host this process runs on.
    pub fn host() -> Self {
        match env::consts::OS {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            _ => Self::Unix,
        }
    }

    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Suffix Bazel gives the produced shared library.
    ///
    /// Python extension modules use `.so` on macOS as well, so only Windows
    /// differs.
    pub const fn shared_lib_suffix(self) -> &'static str {
        match self {
            Self::Windows => ".dll",
            Self::MacOs | Self::Unix => ".so",
        }
    }

    /// The `srcs` declaration for the interpreter's shared library.
    ///
    /// macOS is the only platform whose dynamic libraries need the explicit
    /// link; everywhere else the rendered line stays empty.
    pub const fn link_library_line(self) -> &'static str {
        match self {
            Self::MacOs => "srcs = [\"lib/libpython3.dylib\"],",
            Self::Windows | Self::Unix => "",
        }
    }

    /// Linker search-path flags for the given library directories.
    ///
    /// Only the Windows linker needs them spelled out per directory.
    pub fn libpath_linkopts(self, library_dirs: &[PathBuf]) -> Vec<String> {
        if !self.is_windows() {
            return Vec::new();
        }

        library_dirs
            .iter()
            .map(|dir| format!("--linkopt=/LIBPATH:{}", dir.display()))
            .collect()
    }
}
