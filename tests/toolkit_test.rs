use markdown_toolkit::{
    Invocation, ProcessRunner, ProcessStatus, SetupPlan, Toolkit, ToolkitError, FIX_SCRIPT,
};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Records invocations instead of running them; exits with `exit_code`.
struct FakeRunner {
    exit_code: i32,
    calls: RefCell<Vec<(Invocation, PathBuf)>>,
}

impl FakeRunner {
    fn exiting(exit_code: i32) -> Self {
        Self {
            exit_code,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ProcessRunner for FakeRunner {
    fn run(
        &self,
        invocation: &Invocation,
        working_dir: &Path,
    ) -> markdown_toolkit::Result<ProcessStatus> {
        self.calls
            .borrow_mut()
            .push((invocation.clone(), working_dir.to_path_buf()));
        Ok(ProcessStatus::from_code(self.exit_code))
    }
}

#[test]
fn test_lint_check_and_fix_modes() {
    let project = tempdir().unwrap();
    let runner = FakeRunner::exiting(0);
    let toolkit = Toolkit::new("/unused").with_runner(&runner);

    toolkit.lint(project.path(), false).unwrap();
    toolkit.lint(project.path(), true).unwrap();

    let calls = runner.calls.borrow();
    assert_eq!(
        calls[0].0.to_string(),
        "markdownlint '**/*.md' --ignore node_modules --ignore .next"
    );
    assert_eq!(
        calls[1].0.to_string(),
        "markdownlint '**/*.md' --ignore node_modules --ignore .next --fix"
    );
    assert!(calls.iter().all(|(_, cwd)| cwd == project.path()));
}

#[test]
fn test_lint_failure_carries_linter_exit_code() {
    let project = tempdir().unwrap();
    let runner = FakeRunner::exiting(1);

    let err = Toolkit::new("/unused")
        .with_runner(&runner)
        .lint(project.path(), false)
        .unwrap_err();

    assert!(matches!(err, ToolkitError::ProcessFailed { code: Some(1), .. }));
}

#[test]
fn test_setup_failure_skips_hook_init() {
    let package = tempdir().unwrap();
    let project = tempdir().unwrap();
    let runner = FakeRunner::exiting(2);

    let result = Toolkit::new(package.path())
        .with_runner(&runner)
        .setup(project.path());

    assert!(result.is_err());
    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.program, "npm");
}

#[test]
fn test_custom_plan_drives_copy_and_install() {
    let package = tempdir().unwrap();
    let project = tempdir().unwrap();
    fs::write(package.path().join(".markdownlint.json"), "{}").unwrap();
    let mut plan = SetupPlan::standard();
    plan.config_files.truncate(1);
    plan.dev_dependencies = vec!["markdownlint-cli".to_string()];
    let runner = FakeRunner::exiting(0);

    let toolkit = Toolkit::new(package.path())
        .with_runner(&runner)
        .with_plan(plan);
    toolkit.setup(project.path()).unwrap();

    assert!(project.path().join(".markdownlint.json").exists());
    assert!(!project.path().join(".husky").exists());
    assert_eq!(
        runner.calls.borrow()[0].0.to_string(),
        "npm install --save-dev markdownlint-cli"
    );
}

#[test]
fn test_fix_all_requires_bundled_script() {
    let package = tempdir().unwrap();
    let project = tempdir().unwrap();
    let runner = FakeRunner::exiting(0);
    let toolkit = Toolkit::new(package.path()).with_runner(&runner);

    let err = toolkit.fix_all(project.path()).unwrap_err();
    assert!(matches!(err, ToolkitError::FixScriptNotFound { .. }));

    fs::write(package.path().join(FIX_SCRIPT), "exit 0\n").unwrap();
    toolkit.fix_all(project.path()).unwrap();
    assert_eq!(runner.calls.borrow()[0].0.program, "bash");
}
