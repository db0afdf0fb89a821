//! Type definitions for the markdown toolkit

use std::fmt;

/// File name of the bundled fix script inside the package root.
pub const FIX_SCRIPT: &str = "fix-all-markdown-errors.sh";

/// A single configuration file copied from the package into a project.
///
/// Contents are opaque: the file is copied byte-for-byte, never parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigFile {
    /// Path relative to the package root
    pub source: &'static str,
    /// Path relative to the target project directory
    pub destination: &'static str,
    /// Human-readable name used in progress output
    pub label: &'static str,
}

const CONFIG_FILES: &[ConfigFile] = &[
    ConfigFile {
        source: ".markdownlint.json",
        destination: ".markdownlint.json",
        label: "markdownlint config",
    },
    ConfigFile {
        source: ".lintstagedrc.json",
        destination: ".lintstagedrc.json",
        label: "lint-staged config",
    },
    ConfigFile {
        source: "pre-commit",
        destination: ".husky/pre-commit",
        label: "pre-commit hook",
    },
];

const DEV_DEPENDENCIES: &[&str] = &["markdownlint-cli", "prettier", "husky", "lint-staged"];

/// Everything `setup` installs into a project.
///
/// Both the CLI and the library API read the file list and dependency list
/// from this value, so there is exactly one place that names them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupPlan {
    pub config_files: Vec<ConfigFile>,
    pub dev_dependencies: Vec<String>,
}

impl SetupPlan {
    /// The plan shipped with this package.
    pub fn standard() -> Self {
        Self {
            config_files: CONFIG_FILES.to_vec(),
            dev_dependencies: DEV_DEPENDENCIES.iter().map(|d| (*d).to_string()).collect(),
        }
    }
}

impl Default for SetupPlan {
    fn default() -> Self {
        Self::standard()
    }
}

/// An external command line: program plus arguments, no shell involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    /// Renders the invocation for a package.json `scripts` entry.
    ///
    /// npm runs scripts through sh on Unix and cmd.exe on Windows; only
    /// double quotes keep a glob like `**/*.md` intact under both.
    pub fn to_npm_script(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|word| double_quote(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Renders the invocation the way it would be typed into a POSIX shell.
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

fn is_plain(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@+,%".contains(c))
}

fn shell_quote(word: &str) -> String {
    if is_plain(word) {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

fn double_quote(word: &str) -> String {
    if is_plain(word) {
        word.to_string()
    } else {
        format!("\"{}\"", word.replace('"', "\\\""))
    }
}

/// Exit status of an external program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ProcessStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_plan_contents() {
        let plan = SetupPlan::standard();

        let destinations: Vec<_> = plan.config_files.iter().map(|c| c.destination).collect();
        assert_eq!(
            destinations,
            [".markdownlint.json", ".lintstagedrc.json", ".husky/pre-commit"]
        );
        assert_eq!(
            plan.dev_dependencies,
            ["markdownlint-cli", "prettier", "husky", "lint-staged"]
        );
    }

    #[test]
    fn test_invocation_display_quotes_globs() {
        let invocation = Invocation::new("markdownlint", ["**/*.md", "--ignore", "node_modules"]);
        assert_eq!(
            invocation.to_string(),
            "markdownlint '**/*.md' --ignore node_modules"
        );
    }

    #[test]
    fn test_invocation_display_escapes_single_quotes() {
        let invocation = Invocation::new("bash", ["/tmp/it's here/fix.sh"]);
        assert_eq!(invocation.to_string(), r"bash '/tmp/it'\''s here/fix.sh'");
    }

    #[test]
    fn test_npm_script_uses_double_quotes() {
        let invocation = Invocation::new("markdownlint", ["**/*.md", "--ignore", ".next", "--fix"]);
        assert_eq!(
            invocation.to_npm_script(),
            r#"markdownlint "**/*.md" --ignore .next --fix"#
        );
        assert!(!invocation.to_npm_script().contains('\''));
    }

    #[test]
    fn test_process_status_success() {
        assert!(ProcessStatus::SUCCESS.success());
        assert!(!ProcessStatus::from_code(1).success());
        assert!(!ProcessStatus { code: None }.success());
    }
}
