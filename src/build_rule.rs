//! Build-rule template rendering
//!
//! `python_headers.BUILD.in` ships two literal tokens: one for the
//! interpreter's include directory (relative to the installation prefix) and
//! one for an optional link-library declaration. The rendered sibling file
//! is what Bazel actually loads; the template is never mutated.

use crate::config::BuildConfig;
use crate::paths::{relative_path, to_forward_slashes};
use crate::platform::Platform;
use anyhow::{Context, Result};
use std::fs;

/// Token replaced with the prefix-relative interpreter header directory.
pub const INCLUDE_DIRECTORIES_TOKEN: &str = "@INCLUDE_DIRECTORIES_PLACEHOLDER@";

/// Token replaced with the platform's link-library declaration (or nothing).
pub const LINK_LIBRARY_LINE_TOKEN: &str = "@LINK_LIBRARY_LINE_PLACEHOLDER@";

/// Pure token replacement over the loaded template text.
pub fn render(template: &str, include_dir: &str, platform: Platform) -> String {
    template
        .replace(INCLUDE_DIRECTORIES_TOKEN, include_dir)
        .replace(LINK_LIBRARY_LINE_TOKEN, platform.link_library_line())
}

/// Render the build-rule template into its fixed output file.
///
/// Run once per build invocation, independent of how many targets follow.
pub fn render_build_rule(config: &BuildConfig, platform: Platform) -> Result<()> {
    let template = fs::read_to_string(&config.build_template).with_context(|| {
        format!(
            "failed to read build-rule template {}",
            config.build_template.display()
        )
    })?;

    let include_dir = to_forward_slashes(&relative_path(
        &config.prefix,
        &config.python.include_dir,
    ));
    let rendered = render(&template, &include_dir, platform);

    fs::write(&config.build_rule_out, rendered).with_context(|| {
        format!(
            "failed to write rendered build rule {}",
            config.build_rule_out.display()
        )
    })?;

    Ok(())
}
