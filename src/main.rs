//! Markdown Toolkit command-line entry point
//!
//! - `setup`: copy lint configs, install dev dependencies, initialize git hooks
//! - `fix`: run the bundled fix script in the current project
//! - `help`: show usage

use markdown_toolkit::cli::{execute, parse_args, report_parse_error, EXIT_FAILURE};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

fn main() -> ExitCode {
    let options = match parse_args(std::env::args_os()) {
        Ok(options) => options,
        Err(err) => return ExitCode::from(report_parse_error(&err)),
    };

    setup_logging(options.verbosity);

    match execute(&options) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
    tracing::debug!("logging initialized at {level}");
}
