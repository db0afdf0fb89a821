//! Toolchain configuration loading

use crate::error::{Result, ToolkitError};
use crate::types::{Invocation, SetupPlan};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the optional per-project configuration file.
pub const CONFIG_FILE_NAME: &str = ".markdown-toolkit.toml";

/// External programs the toolkit delegates to.
///
/// Defaults match an npm project. A project can override any field in the
/// `[toolchain]` table of `.markdown-toolkit.toml`, e.g. for pnpm:
///
/// ```toml
/// [toolchain]
/// package_manager = "pnpm"
/// install_args = ["add", "-D"]
/// package_runner = "pnpm"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Toolchain {
    pub package_manager: String,
    pub install_args: Vec<String>,
    pub package_runner: String,
    pub linter: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            package_manager: "npm".to_string(),
            install_args: vec!["install".to_string(), "--save-dev".to_string()],
            package_runner: "npx".to_string(),
            linter: "markdownlint".to_string(),
        }
    }
}

impl Toolchain {
    /// `npm install --save-dev <deps...>` or the configured equivalent.
    pub fn install_invocation(&self, plan: &SetupPlan) -> Invocation {
        let args = self
            .install_args
            .iter()
            .chain(plan.dev_dependencies.iter())
            .cloned();
        Invocation::new(self.package_manager.clone(), args)
    }

    /// `npx husky init` or the configured equivalent.
    pub fn hook_init_invocation(&self) -> Invocation {
        Invocation::new(self.package_runner.clone(), ["husky", "init"])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigDocument {
    toolchain: Toolchain,
}

/// Loads the toolchain for a project directory.
///
/// A missing config file is not an error: the npm defaults apply.
///
/// # Returns
/// * `Ok(Toolchain)` - Configured or default toolchain
/// * `Err` - If the file exists but cannot be read or parsed
pub fn load_toolchain(target_dir: &Path) -> Result<Toolchain> {
    let config_path = target_dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        tracing::debug!("no {CONFIG_FILE_NAME} in {}, using defaults", target_dir.display());
        return Ok(Toolchain::default());
    }

    let content = fs::read_to_string(&config_path).map_err(|source| ToolkitError::Config {
        path: config_path.clone(),
        source,
    })?;

    let config: ConfigDocument =
        toml::from_str(&content).map_err(|source| ToolkitError::ConfigParse {
            path: config_path.clone(),
            source,
        })?;

    tracing::info!(toolchain = ?config.toolchain, "loaded {}", config_path.display());
    Ok(config.toolchain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_npm_defaults() {
        let dir = tempdir().unwrap();
        let toolchain = load_toolchain(dir.path()).unwrap();
        assert_eq!(toolchain, Toolchain::default());
        assert_eq!(
            toolchain.install_invocation(&SetupPlan::standard()).to_string(),
            "npm install --save-dev markdownlint-cli prettier husky lint-staged"
        );
        assert_eq!(toolchain.hook_init_invocation().to_string(), "npx husky init");
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[toolchain]\npackage_manager = \"pnpm\"\ninstall_args = [\"add\", \"-D\"]\n",
        )
        .unwrap();

        let toolchain = load_toolchain(dir.path()).unwrap();
        assert_eq!(toolchain.package_manager, "pnpm");
        assert_eq!(toolchain.install_args, ["add", "-D"]);
        assert_eq!(toolchain.package_runner, "npx");
        assert_eq!(toolchain.linter, "markdownlint");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[toolchain]\npackage_manager = 3\n").unwrap();

        let err = load_toolchain(dir.path()).unwrap_err();
        assert!(matches!(err, ToolkitError::ConfigParse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_unknown_toolchain_key_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[toolchain]\npackage_manger = \"yarn\"\n").unwrap();

        assert!(load_toolchain(dir.path()).is_err());
    }
}
