//! Error types for the markdown toolkit

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while setting up, fixing or linting a project
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// The bundled fix script is not present in the package root
    #[error("Fix script not found at {path}. Please reinstall the package.")]
    FixScriptNotFound { path: PathBuf },

    /// The project directory to operate on does not exist
    #[error("Project directory not found: {path}")]
    TargetDirNotFound { path: PathBuf },

    /// An external program could not be located on PATH
    #[error("Program '{program}' not found on PATH: {source}")]
    ProgramNotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    /// An external program could not be started
    #[error("Failed to run '{invocation}': {source}")]
    Spawn {
        invocation: String,
        #[source]
        source: std::io::Error,
    },

    /// An external program ran but exited unsuccessfully
    #[error("Command '{invocation}' {}", describe_exit(.code))]
    ProcessFailed {
        invocation: String,
        code: Option<i32>,
    },

    /// A destination directory could not be created
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The toolchain config file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The toolchain config file is not valid TOML for the expected shape
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// package.json could not be parsed or has an unexpected shape
    #[error("Invalid package.json at {path}: {reason}")]
    PackageJson { path: PathBuf, reason: String },

    /// Generic IO failure with the path involved
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ToolkitError {
    /// Creates an IO error for the given path
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code reported by the external program, if this error came from one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ProcessFailed { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Result type alias for toolkit operations
pub type Result<T> = std::result::Result<T, ToolkitError>;
