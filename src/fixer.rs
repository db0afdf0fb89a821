//! Fixing and linting markdown through external tools

use crate::config::Toolchain;
use crate::error::{Result, ToolkitError};
use crate::process::{run_checked, ProcessRunner};
use crate::types::{Invocation, FIX_SCRIPT};
use std::path::Path;

/// Directories markdownlint never scans.
pub const IGNORED_DIRS: [&str; 2] = ["node_modules", ".next"];

const MARKDOWN_GLOB: &str = "**/*.md";

/// Runs the bundled fix script against every markdown file under `target_dir`.
///
/// The script is looked up only in `package_root`; if it is not there the
/// call fails without running anything.
pub fn fix_all<R: ProcessRunner + ?Sized>(
    runner: &R,
    package_root: &Path,
    target_dir: &Path,
) -> Result<()> {
    let script = package_root.join(FIX_SCRIPT);
    if !script.is_file() {
        return Err(ToolkitError::FixScriptNotFound { path: script });
    }

    let invocation = Invocation::new("bash", [script.to_string_lossy()]);
    println!("🔧 Fixing all markdown errors...");
    run_checked(runner, &invocation, target_dir)?;
    println!("✅ All markdown errors fixed!");
    Ok(())
}

/// Builds the markdownlint command line, with `--fix` when `fix` is set.
pub fn lint_invocation(toolchain: &Toolchain, fix: bool) -> Invocation {
    let mut args = vec![MARKDOWN_GLOB.to_string()];
    for dir in IGNORED_DIRS {
        args.push("--ignore".to_string());
        args.push(dir.to_string());
    }
    if fix {
        args.push("--fix".to_string());
    }
    Invocation::new(toolchain.linter.clone(), args)
}

/// Lints (or fixes, with `fix`) markdown under `target_dir`.
///
/// A non-zero markdownlint exit comes back as
/// [`ToolkitError::ProcessFailed`] carrying the linter's own exit code.
pub fn lint<R: ProcessRunner + ?Sized>(
    runner: &R,
    toolchain: &Toolchain,
    target_dir: &Path,
    fix: bool,
) -> Result<()> {
    run_checked(runner, &lint_invocation(toolchain, fix), target_dir)
}
