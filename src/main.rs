//! bazext command-line interface
//!
//! Bazel-backed native extension builder for Python packaging.

mod commands;

use clap::{Parser, Subcommand};
use std::process;

/// Display an error with its chain of causes.
fn display_error(err: &anyhow::Error) {
    eprintln!("error: {err}");

    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = cause.source();
    }
}

#[derive(Parser)]
#[command(name = "bazext")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build Bazel-defined Python extension modules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build extension modules and copy them into the dist layout
    Build {
        /// Bazel labels to build (read from the manifest when omitted)
        targets: Vec<String>,

        /// Path to the manifest listing ext-modules
        #[arg(long, default_value = bazext::manifest::DEFAULT_MANIFEST)]
        manifest: String,

        /// Build with --compilation_mode=dbg instead of opt
        #[arg(long)]
        debug: bool,

        /// Directory the built extensions are copied into
        #[arg(long, default_value = "dist")]
        dist_dir: String,

        /// Scratch directory for Bazel's symlink prefix and outputs
        #[arg(long, default_value = bazext::config::DEFAULT_BUILD_TEMP)]
        build_temp: String,

        /// Print progress and the resolved copy paths
        #[arg(long)]
        verbose: bool,
    },

    /// Check that the build environment is usable
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    // BAZEXT_DEBUG=1 turns on debug logging.
    bazext::init_debug(false);

    let result = match cli.command {
        Commands::Build {
            targets,
            manifest,
            debug,
            dist_dir,
            build_temp,
            verbose,
        } => commands::build::run(&targets, &manifest, debug, &dist_dir, &build_temp, verbose),
        Commands::Doctor => commands::doctor::run(),
    };

    if let Err(err) = result {
        display_error(&err);
        process::exit(1);
    }
}
