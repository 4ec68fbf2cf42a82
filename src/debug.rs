//! Debug logging
//!
//! A process-wide switch read by the `debug!` macro, set once from the CLI
//! or the `BAZEXT_DEBUG` environment variable. Disabled logging costs one
//! atomic load.

use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Turn debug output on or off for the rest of the process.
///
/// `BAZEXT_DEBUG=1` (or `true`) wins over a `false` argument, so the
/// environment can force logging on without touching the command line.
/// Later calls are ignored.
pub fn init_debug(enabled: bool) {
    let _ = DEBUG_ENABLED.set(enabled || env_enabled());
}

fn env_enabled() -> bool {
    std::env::var("BAZEXT_DEBUG").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Whether debug output is currently on.
pub fn is_debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(env_enabled)
}

/// Print to stderr when debug mode is on.
///
/// Usage: `debug!("building {}", target)`
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::debug::is_debug_enabled() {
            eprintln!("[debug] {}", format_args!($($arg)*));
        }
    };
}
