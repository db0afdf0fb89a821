//! Installation and project setup logic

use crate::config::Toolchain;
use crate::error::{Result, ToolkitError};
use crate::fixer::lint_invocation;
use crate::process::{run_checked, ProcessRunner};
use crate::types::{ConfigFile, Invocation, SetupPlan};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// npm script names registered in package.json, check mode first.
pub const LINT_SCRIPTS: [&str; 2] = ["lint:md", "lint:md:fix"];

/// What happened to a single config file during [`copy_configs`].
#[derive(Debug)]
pub enum CopyOutcome {
    Copied { file: ConfigFile, destination: PathBuf },
    Missing { file: ConfigFile, source: PathBuf },
    Failed { file: ConfigFile, error: ToolkitError },
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, Self::Copied { .. })
    }
}

/// Copies every config file of the plan from the package root into the project.
///
/// Missing sources and failed copies are reported and skipped; the remaining
/// files are still copied and nothing already copied is rolled back.
/// Existing destination files are overwritten.
pub fn copy_configs(plan: &SetupPlan, package_root: &Path, target_dir: &Path) -> Vec<CopyOutcome> {
    plan.config_files
        .iter()
        .map(|file| {
            let outcome = copy_config(*file, package_root, target_dir);
            match &outcome {
                CopyOutcome::Copied { file, .. } => println!("✅ Copied {}", file.label),
                CopyOutcome::Missing { file, .. } => {
                    eprintln!("⚠️  Source file not found: {}", file.source);
                }
                CopyOutcome::Failed { file, error } => {
                    eprintln!("❌ Failed to copy {}: {error}", file.label);
                }
            }
            outcome
        })
        .collect()
}

fn copy_config(file: ConfigFile, package_root: &Path, target_dir: &Path) -> CopyOutcome {
    let source = package_root.join(file.source);
    let destination = target_dir.join(file.destination);

    if !source.is_file() {
        return CopyOutcome::Missing { file, source };
    }

    // Only directories inside the project (e.g. `.husky/`) are created
    if !target_dir.is_dir() {
        let error = ToolkitError::TargetDirNotFound {
            path: target_dir.to_path_buf(),
        };
        return CopyOutcome::Failed { file, error };
    }

    if let Some(parent) = destination.parent() {
        if let Err(source) = fs::create_dir_all(parent) {
            let error = ToolkitError::CreateDir {
                path: parent.to_path_buf(),
                source,
            };
            return CopyOutcome::Failed { file, error };
        }
    }

    match fs::copy(&source, &destination) {
        Ok(bytes) => {
            tracing::debug!(bytes, "copied {} -> {}", source.display(), destination.display());
            CopyOutcome::Copied { file, destination }
        }
        Err(err) => CopyOutcome::Failed {
            file,
            error: ToolkitError::io(destination, err),
        },
    }
}

/// Installs the plan's dev dependencies with the project's package manager.
pub fn install_dependencies<R: ProcessRunner + ?Sized>(
    runner: &R,
    toolchain: &Toolchain,
    plan: &SetupPlan,
    target_dir: &Path,
) -> Result<()> {
    run_step(
        runner,
        "Installing dependencies",
        &toolchain.install_invocation(plan),
        target_dir,
    )
}

/// Runs `husky init` to wire up the git hooks directory.
pub fn init_git_hooks<R: ProcessRunner + ?Sized>(
    runner: &R,
    toolchain: &Toolchain,
    target_dir: &Path,
) -> Result<()> {
    run_step(
        runner,
        "Initializing git hooks",
        &toolchain.hook_init_invocation(),
        target_dir,
    )
}

fn run_step<R: ProcessRunner + ?Sized>(
    runner: &R,
    description: &str,
    invocation: &Invocation,
    target_dir: &Path,
) -> Result<()> {
    println!("🔧 {description}...");
    run_checked(runner, invocation, target_dir)?;
    println!("✅ {description} completed!");
    Ok(())
}

/// Result of [`register_lint_scripts`].
#[derive(Debug, PartialEq, Eq)]
pub enum ScriptsUpdate {
    /// Names of the scripts that were added
    Added(Vec<String>),
    AlreadyPresent,
    NoPackageJson,
}

/// Adds the `lint:md` and `lint:md:fix` scripts to the project's package.json.
///
/// Scripts the project already defines under those names are left alone, as
/// is every other key, so the file is rewritten in place without a backup.
/// Script bodies use double quotes, which both sh and cmd.exe accept.
///
/// # Returns
/// * `Ok(ScriptsUpdate)` - What changed, if anything
/// * `Err` - If package.json cannot be read, parsed or written
pub fn register_lint_scripts(toolchain: &Toolchain, target_dir: &Path) -> Result<ScriptsUpdate> {
    let package_json = target_dir.join("package.json");
    if !package_json.exists() {
        eprintln!("⚠️  No package.json found, skipping npm scripts");
        return Ok(ScriptsUpdate::NoPackageJson);
    }

    let content =
        fs::read_to_string(&package_json).map_err(|e| ToolkitError::io(&package_json, e))?;
    let mut manifest: Value = serde_json::from_str(&content).map_err(|e| invalid(&package_json, e))?;

    let root = manifest
        .as_object_mut()
        .ok_or_else(|| invalid(&package_json, "top level must be a JSON object"))?;
    let scripts = root
        .entry("scripts")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| invalid(&package_json, "\"scripts\" must be a JSON object"))?;

    let mut added = Vec::new();
    for (name, fix) in [(LINT_SCRIPTS[0], false), (LINT_SCRIPTS[1], true)] {
        if scripts.contains_key(name) {
            tracing::debug!("package.json already defines {name}");
            continue;
        }
        let command = lint_invocation(toolchain, fix).to_npm_script();
        scripts.insert(name.to_string(), Value::String(command));
        added.push(name.to_string());
    }

    if added.is_empty() {
        println!("✅ npm scripts already present");
        return Ok(ScriptsUpdate::AlreadyPresent);
    }

    let mut updated = serde_json::to_string_pretty(&manifest).map_err(|e| invalid(&package_json, e))?;
    updated.push('\n');
    fs::write(&package_json, updated).map_err(|e| ToolkitError::io(&package_json, e))?;

    println!("✅ Added npm scripts: {}", added.join(", "));
    Ok(ScriptsUpdate::Added(added))
}

fn invalid(path: &Path, reason: impl ToString) -> ToolkitError {
    ToolkitError::PackageJson {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
