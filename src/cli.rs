//! CLI interface and command dispatch

use crate::toolkit::Toolkit;
use anyhow::{Context, Result};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{value_parser, Arg, ArgAction, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// Exit code for success, including printing help.
pub const EXIT_OK: u8 = 0;

/// Exit code for unknown commands, usage errors and failed steps.
pub const EXIT_FAILURE: u8 = 1;

/// The single positional command accepted on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subcommand {
    Setup,
    Fix,
    Help,
    Unknown(String),
}

impl Subcommand {
    /// Maps the raw positional argument to a command; no argument means help.
    ///
    /// `--help` and `-h` normally arrive as flags, but are accepted here too
    /// for `markdown-toolkit -- --help`.
    pub fn parse(arg: Option<&str>) -> Self {
        match arg {
            Some("setup") => Self::Setup,
            Some("fix") => Self::Fix,
            Some("help" | "--help" | "-h") | None => Self::Help,
            Some(other) => Self::Unknown(other.to_string()),
        }
    }
}

/// Parsed command line.
#[derive(Debug, Clone)]
pub struct Options {
    pub command: Subcommand,
    pub package_root: Option<PathBuf>,
    pub target_dir: Option<PathBuf>,
    pub verbosity: u8,
}

fn build_command() -> Command {
    Command::new("markdown-toolkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sets up markdown linting, git hooks and auto-fixing in a project")
        .disable_help_flag(true)
        .disable_help_subcommand(true)
        .arg(Arg::new("command").value_name("COMMAND"))
        .arg(Arg::new("extra").num_args(0..).hide(true))
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .action(ArgAction::SetTrue)
                .help("Show this help message"),
        )
        .arg(
            Arg::new("package-root")
                .long("package-root")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the bundled config files and fix script"),
        )
        .arg(
            Arg::new("dir")
                .short('C')
                .long("dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Project directory to operate on [default: current directory]"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v, -vv, -vvv)"),
        )
}

/// Parses the process arguments (including the program name).
pub fn parse_args<I, T>(args: I) -> std::result::Result<Options, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command().try_get_matches_from(args)?;

    if let Some(extra) = matches.get_many::<String>("extra") {
        tracing::debug!("ignoring extra arguments: {:?}", extra.collect::<Vec<_>>());
    }

    // -h/--help anywhere on the line wins over the command
    let command = if matches.get_flag("help") {
        Subcommand::Help
    } else {
        Subcommand::parse(matches.get_one::<String>("command").map(String::as_str))
    };

    Ok(Options {
        command,
        package_root: matches.get_one::<PathBuf>("package-root").cloned(),
        target_dir: matches.get_one::<PathBuf>("dir").cloned(),
        verbosity: matches.get_count("verbose"),
    })
}

/// Reports a command-line parsing failure and returns the exit code.
///
/// `--version` surfaces as a clap "error" too and exits successfully. An
/// unrecognised flag is reported like any other unknown command.
pub fn report_parse_error(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayVersion | ErrorKind::DisplayHelp => {
            let _ = err.print();
            return EXIT_OK;
        }
        ErrorKind::UnknownArgument => {
            if let Some(arg) = invalid_arg(err) {
                return unknown_command(arg);
            }
            let _ = err.print();
        }
        _ => {
            let _ = err.print();
        }
    }
    println!();
    print_help();
    EXIT_FAILURE
}

fn invalid_arg(err: &clap::Error) -> Option<&str> {
    match err.get(ContextKind::InvalidArg)? {
        ContextValue::String(arg) => Some(arg.as_str()),
        _ => None,
    }
}

fn unknown_command(command: &str) -> u8 {
    eprintln!("❌ Unknown command: {command}");
    println!();
    print_help();
    EXIT_FAILURE
}

/// Runs the selected command.
///
/// Usage problems are reported through the exit code; failures of the
/// setup or fix sequence come back as errors.
pub fn execute(options: &Options) -> Result<u8> {
    match &options.command {
        Subcommand::Help => {
            print_help();
            Ok(EXIT_OK)
        }
        Subcommand::Unknown(command) => Ok(unknown_command(command)),
        Subcommand::Setup => {
            let target_dir = resolve_target_dir(options)?;
            toolkit(options).setup(&target_dir).context("Setup failed")?;
            print_next_steps();
            Ok(EXIT_OK)
        }
        Subcommand::Fix => {
            let target_dir = resolve_target_dir(options)?;
            toolkit(options).fix_all(&target_dir).context("Fix failed")?;
            Ok(EXIT_OK)
        }
    }
}

fn toolkit(options: &Options) -> Toolkit {
    let toolkit = match &options.package_root {
        Some(root) => Toolkit::new(root.clone()),
        None => Toolkit::locate(),
    };
    tracing::info!("package root: {}", toolkit.package_root().display());
    toolkit
}

fn resolve_target_dir(options: &Options) -> Result<PathBuf> {
    match &options.target_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}

fn print_help() {
    print!(
        r#"
📦 Markdown Toolkit v{version} - Complete Linting Solution

Usage:
  markdown-toolkit <command> [options]

Commands:
  setup     Set up markdown linting in current project
  fix       Fix all markdown errors in current project
  help      Show this help message

Options:
  -C, --dir <DIR>           Project directory [default: current directory]
      --package-root <DIR>  Directory holding the bundled config files
  -v, --verbose             Increase log verbosity
  -h, --help                Show this help message
      --version             Print version

Examples:
  markdown-toolkit setup    # Install and configure markdown linting
  markdown-toolkit fix      # Fix all markdown errors

For more information: {homepage}
"#,
        version = env!("CARGO_PKG_VERSION"),
        homepage = env!("CARGO_PKG_HOMEPAGE"),
    );
}

fn print_next_steps() {
    println!(
        r#"
📝 Available commands:
  npm run lint:md      - Check markdown files
  npm run lint:md:fix  - Auto-fix markdown issues

🔧 To fix all errors now:
  markdown-toolkit fix
"#
    );
}
