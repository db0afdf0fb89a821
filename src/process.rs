//! Running external programs

use crate::error::{Result, ToolkitError};
use crate::types::{Invocation, ProcessStatus};
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Capability to run an external program to completion.
///
/// Everything the toolkit delegates (package manager, husky, markdownlint,
/// the fix script) goes through this trait so tests can swap in a fake.
pub trait ProcessRunner {
    /// Runs `invocation` in `working_dir` and waits for it to exit.
    fn run(&self, invocation: &Invocation, working_dir: &Path) -> Result<ProcessStatus>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, invocation: &Invocation, working_dir: &Path) -> Result<ProcessStatus> {
        (**self).run(invocation, working_dir)
    }
}

/// Runs programs found on PATH with the caller's stdin, stdout and stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, working_dir: &Path) -> Result<ProcessStatus> {
        let program = which::which(&invocation.program).map_err(|source| {
            ToolkitError::ProgramNotFound {
                program: invocation.program.clone(),
                source,
            }
        })?;
        tracing::debug!(
            program = %program.display(),
            cwd = %working_dir.display(),
            "running {invocation}"
        );

        let status = Command::new(&program)
            .args(&invocation.args)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source: io::Error| ToolkitError::Spawn {
                invocation: invocation.to_string(),
                source,
            })?;

        tracing::debug!(code = ?status.code(), "{invocation} finished");
        Ok(status.into())
    }
}

/// Runs `invocation` and turns a non-zero exit into [`ToolkitError::ProcessFailed`].
pub fn run_checked<R: ProcessRunner + ?Sized>(
    runner: &R,
    invocation: &Invocation,
    working_dir: &Path,
) -> Result<()> {
    let status = runner.run(invocation, working_dir)?;
    if status.success() {
        Ok(())
    } else {
        Err(ToolkitError::ProcessFailed {
            invocation: invocation.to_string(),
            code: status.code,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Records every invocation and answers with a scripted exit code per program.
    #[derive(Default)]
    pub struct RecordingRunner {
        pub calls: RefCell<Vec<(Invocation, PathBuf)>>,
        exit_codes: HashMap<String, i32>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing(mut self, program: &str, code: i32) -> Self {
            self.exit_codes.insert(program.to_string(), code);
            self
        }

        pub fn programs(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|(i, _)| i.program.clone()).collect()
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, invocation: &Invocation, working_dir: &Path) -> Result<ProcessStatus> {
            self.calls
                .borrow_mut()
                .push((invocation.clone(), working_dir.to_path_buf()));
            let code = self.exit_codes.get(&invocation.program).copied().unwrap_or(0);
            Ok(ProcessStatus::from_code(code))
        }
    }
}
