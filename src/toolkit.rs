//! Library entry point tying the plan, toolchain and runner together

use crate::config::load_toolchain;
use crate::error::{Result, ToolkitError};
use crate::fixer;
use crate::installer::{self, CopyOutcome};
use crate::process::{ProcessRunner, SystemRunner};
use crate::types::SetupPlan;
use std::path::{Path, PathBuf};

/// Bundled assets next to the crate sources, used for `cargo run` builds.
const DEV_ASSETS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

/// Marker file used to recognise a package root.
const ROOT_MARKER: &str = ".markdownlint.json";

/// Sets up, fixes and lints markdown in project directories.
///
/// `package_root` is the directory holding the bundled config files and the
/// fix script. Every operation takes the project directory explicitly.
#[derive(Debug, Clone)]
pub struct Toolkit<R = SystemRunner> {
    package_root: PathBuf,
    plan: SetupPlan,
    runner: R,
}

impl Toolkit<SystemRunner> {
    pub fn new(package_root: impl Into<PathBuf>) -> Self {
        Self {
            package_root: package_root.into(),
            plan: SetupPlan::standard(),
            runner: SystemRunner,
        }
    }

    /// Creates a toolkit whose package root is found relative to the running executable.
    pub fn locate() -> Self {
        Self::new(locate_package_root())
    }
}

impl<R: ProcessRunner> Toolkit<R> {
    /// Replaces the process runner, e.g. with a recording fake in tests.
    pub fn with_runner<S: ProcessRunner>(self, runner: S) -> Toolkit<S> {
        Toolkit {
            package_root: self.package_root,
            plan: self.plan,
            runner,
        }
    }

    pub fn with_plan(mut self, plan: SetupPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    pub fn plan(&self) -> &SetupPlan {
        &self.plan
    }

    /// Copies configs, installs dev dependencies, initializes husky and
    /// registers the npm lint scripts, in that order.
    ///
    /// Stops at the first external command that fails; config files already
    /// copied stay in place.
    pub fn setup(&self, target_dir: &Path) -> Result<()> {
        ensure_target_dir(target_dir)?;
        println!("🚀 Setting up markdown linting...");
        let toolchain = load_toolchain(target_dir)?;

        installer::copy_configs(&self.plan, &self.package_root, target_dir);
        println!("📦 Installing dependencies...");
        installer::install_dependencies(&self.runner, &toolchain, &self.plan, target_dir)?;
        installer::init_git_hooks(&self.runner, &toolchain, target_dir)?;
        installer::register_lint_scripts(&toolchain, target_dir)?;

        println!("✅ Markdown toolkit setup complete!");
        Ok(())
    }

    pub fn copy_configs(&self, target_dir: &Path) -> Result<Vec<CopyOutcome>> {
        ensure_target_dir(target_dir)?;
        Ok(installer::copy_configs(&self.plan, &self.package_root, target_dir))
    }

    pub fn fix_all(&self, target_dir: &Path) -> Result<()> {
        ensure_target_dir(target_dir)?;
        fixer::fix_all(&self.runner, &self.package_root, target_dir)
    }

    pub fn lint(&self, target_dir: &Path, fix: bool) -> Result<()> {
        ensure_target_dir(target_dir)?;
        let toolchain = load_toolchain(target_dir)?;
        fixer::lint(&self.runner, &toolchain, target_dir, fix)
    }
}

fn ensure_target_dir(target_dir: &Path) -> Result<()> {
    if target_dir.is_dir() {
        Ok(())
    } else {
        Err(ToolkitError::TargetDirNotFound {
            path: target_dir.to_path_buf(),
        })
    }
}

/// Finds the directory holding the bundled assets.
///
/// Tries, in order, the install prefix (`<exe dir>/..`), a shared data dir
/// (`<exe dir>/../share/markdown-toolkit`), the executable's own directory
/// and finally the crate's `assets/` directory. Falls back to the first
/// candidate so error messages point at the install location.
pub fn locate_package_root() -> PathBuf {
    let mut candidates = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(exe_dir) = exe.parent() {
            if let Some(prefix) = exe_dir.parent() {
                candidates.push(prefix.to_path_buf());
                candidates.push(prefix.join("share").join(env!("CARGO_PKG_NAME")));
            }
            candidates.push(exe_dir.to_path_buf());
        }
    }
    candidates.push(PathBuf::from(DEV_ASSETS));

    let found = candidates.iter().find(|dir| dir.join(ROOT_MARKER).is_file());
    tracing::debug!(?candidates, ?found, "resolving package root");
    found.or_else(|| candidates.first()).cloned().unwrap_or_else(|| PathBuf::from(DEV_ASSETS))
}
