//! Markdown Toolkit
//!
//! Bootstraps markdown linting in a project: copies markdownlint, lint-staged
//! and pre-commit configuration, installs the linting tools as dev
//! dependencies, initializes husky git hooks and runs a bundled fix script.
//!
//! The same operations are available programmatically through [`Toolkit`]:
//!
//! ```no_run
//! use markdown_toolkit::Toolkit;
//! use std::path::Path;
//!
//! let toolkit = Toolkit::locate();
//! toolkit.setup(Path::new("."))?;
//! toolkit.lint(Path::new("."), true)?;
//! # Ok::<(), markdown_toolkit::ToolkitError>(())
//! ```

// Public API - main functions and essential types for external users
pub use cli::{execute, parse_args, Options, Subcommand};
pub use config::{load_toolchain, Toolchain};
pub use error::{Result, ToolkitError};
pub use fixer::lint_invocation;
pub use installer::{CopyOutcome, ScriptsUpdate};
pub use process::{ProcessRunner, SystemRunner};
pub use toolkit::{locate_package_root, Toolkit};
pub use types::{ConfigFile, Invocation, ProcessStatus, SetupPlan, FIX_SCRIPT};

pub mod cli;
pub mod config;
pub mod error;
pub mod fixer;
pub mod installer;
pub mod process;
pub mod toolkit;
pub mod types;
